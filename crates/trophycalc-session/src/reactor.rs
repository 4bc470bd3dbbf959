//! Token-change reactor.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::state::{Reaction, TokenChange};
use crate::store::SessionStore;

/// Drives the session after every token change.
///
/// Fires once when spawned, so that a token restored from the credential
/// slot gets resolved, then once per [`TokenChange`](crate::TokenChange).
/// See [`SessionState::reaction`](crate::SessionState::reaction) for the
/// transition table. Dropping the reactor stops it.
#[derive(Debug)]
pub struct Reactor {
    task: JoinHandle<()>,
}

impl Reactor {
    /// Start reacting to `store`. Must be called within a tokio runtime.
    pub fn spawn(store: &SessionStore) -> Self {
        let mut changes = store.subscribe();
        let store = store.clone();

        react(&store, None);

        let task = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => {
                        trace!(?change, "Token change observed");
                        react(&store, Some(change));
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "Reactor fell behind token changes");
                        react(&store, None);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Reactor stopped");
        });

        Self { task }
    }

    /// Stop reacting. Fetches already started keep running.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for Reactor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// React to the current state. `change` is the event that woke the reactor,
/// if any; a `Cleared` event never starts a fetch, even when a newer token
/// has already replaced the cleared one.
fn react(store: &SessionStore, change: Option<TokenChange>) {
    let state = store.state();
    match (change, state.reaction()) {
        (_, Reaction::ClearUser) => store.clear_user(),
        (Some(TokenChange::Cleared), _) => trace!(?state, "Token already replaced after clear"),
        (_, Reaction::FetchUser) => {
            debug!(?state, "Token without user, fetching");
            // Detached: teardown aborts it through the store
            store.spawn_fetch();
        }
        (_, Reaction::Idle) => trace!(?state, "User already cached, nothing to do"),
    }
}
