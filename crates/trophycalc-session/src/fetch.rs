//! Handles to in-flight user fetches.

use tokio::task::JoinHandle;

use trophycalc_core::Result;

/// How a user fetch ended.
///
/// Transport and authentication failures are both reported as `Cleared`:
/// either way the session has been torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No token was present; nothing was requested.
    Skipped,
    /// The user was resolved and stored.
    Loaded,
    /// The fetch failed and the session was logged out.
    Cleared,
    /// The session was torn down while the fetch was in flight; its result
    /// was dropped or the fetch was aborted.
    Discarded,
}

/// A user fetch running in the background.
///
/// Dropping the handle detaches the fetch; it keeps running and still
/// updates the store.
#[derive(Debug)]
pub struct FetchHandle {
    task: JoinHandle<Result<FetchOutcome>>,
}

impl FetchHandle {
    pub(crate) fn new(task: JoinHandle<Result<FetchOutcome>>) -> Self {
        Self { task }
    }

    /// Cancel the fetch. Its result, if any arrives, is never applied.
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the fetch to end.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the failure path could not clear the
    /// persisted token.
    pub async fn outcome(self) -> Result<FetchOutcome> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Ok(FetchOutcome::Discarded),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}
