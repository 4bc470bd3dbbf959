//! Session store: token, user, and the operations that move between them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument, warn};

use trophycalc_core::{CredentialSlot, Result, TOKEN_KEY, Token, User, UserSource};

use crate::fetch::{FetchHandle, FetchOutcome};
use crate::state::{SessionState, Snapshot, TokenChange};

/// Buffered token-change events per subscriber.
const CHANGE_CAPACITY: usize = 16;

/// In-memory holder of the session, mirrored into a credential slot.
///
/// Cloning is cheap; clones share the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    slot: Box<dyn CredentialSlot>,
    source: Box<dyn UserSource>,
    state: Mutex<StoreState>,
    snapshots: watch::Sender<Snapshot>,
    changes: broadcast::Sender<TokenChange>,
}

struct StoreState {
    token: Option<Token>,
    user: Option<User>,
    /// Bumped on every teardown; fetches started in an older epoch are stale.
    epoch: u64,
    in_flight: Vec<AbortHandle>,
}

impl StoreState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }

    fn teardown(&mut self) {
        self.token = None;
        self.epoch += 1;
        for fetch in self.in_flight.drain(..) {
            fetch.abort();
        }
    }
}

impl SessionStore {
    /// Open the session, restoring the token persisted in `slot`.
    ///
    /// No user is loaded yet; start a [`Reactor`](crate::Reactor) to resolve
    /// a restored token.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the slot cannot be read.
    #[instrument(skip_all)]
    pub fn open(
        slot: impl CredentialSlot + 'static,
        source: impl UserSource + 'static,
    ) -> Result<Self> {
        let token = match slot.get(TOKEN_KEY)? {
            Some(raw) => match Token::new(raw) {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!(error = %e, "Ignoring unusable persisted token");
                    None
                }
            },
            None => None,
        };

        debug!(restored = token.is_some(), "Session store opened");

        let state = StoreState {
            token,
            user: None,
            epoch: 0,
            in_flight: Vec::new(),
        };
        let (snapshots, _) = watch::channel(state.snapshot());
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);

        Ok(Self {
            inner: Arc::new(StoreInner {
                slot: Box::new(slot),
                source: Box::new(source),
                state: Mutex::new(state),
                snapshots,
                changes,
            }),
        })
    }

    /// Replace the token and persist it (write when present, delete when
    /// absent), then raise a [`TokenChange`].
    ///
    /// The event is raised on every call, even if the token is unchanged.
    /// Clearing the token invalidates every fetch in flight.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the slot cannot be updated; the in-memory
    /// session is left untouched in that case.
    #[instrument(skip_all, fields(present = token.is_some()))]
    pub fn set_token(&self, token: Option<Token>) -> Result<()> {
        match &token {
            Some(token) => self.inner.slot.set(TOKEN_KEY, token.as_str())?,
            None => self.inner.slot.delete(TOKEN_KEY)?,
        }

        let change = {
            let mut state = self.lock();
            let change = match token {
                Some(token) => {
                    state.token = Some(token);
                    TokenChange::Set
                }
                None => {
                    state.teardown();
                    TokenChange::Cleared
                }
            };
            self.publish(&state);
            change
        };

        self.notify(change);
        Ok(())
    }

    /// Discard the whole session: token, user and persisted credential.
    ///
    /// The in-memory session is always cleared, even if the slot fails.
    /// Logging out of an empty session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persisted credential cannot be deleted.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.lock();
            state.teardown();
            state.user = None;
            self.publish(&state);
        }
        self.notify(TokenChange::Cleared);

        info!("Logged out");
        self.inner.slot.delete(TOKEN_KEY)
    }

    /// Resolve the current token into a user.
    ///
    /// Without a token this returns [`FetchOutcome::Skipped`] and makes no
    /// request. On success the user is replaced wholesale. Any failure, be it
    /// a rejected token, an unreachable backend or an unexpected body, logs
    /// the session out.
    ///
    /// # Errors
    ///
    /// Only storage errors from the logout on the failure path.
    #[instrument(skip(self))]
    pub async fn fetch_user(&self) -> Result<FetchOutcome> {
        let (token, epoch) = {
            let state = self.lock();
            match &state.token {
                Some(token) => (token.clone(), state.epoch),
                None => {
                    debug!("No token, skipping user fetch");
                    return Ok(FetchOutcome::Skipped);
                }
            }
        };

        debug!("Fetching current user");
        let result = self.inner.source.current_user(&token).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            debug!("Session torn down during fetch, dropping result");
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(user) => {
                info!(user_id = user.id, "User loaded");
                state.user = Some(user);
                self.publish(&state);
                Ok(FetchOutcome::Loaded)
            }
            Err(e) => {
                drop(state);
                warn!(error = %e, kind = e.kind(), "User fetch failed, clearing session");
                self.logout()?;
                Ok(FetchOutcome::Cleared)
            }
        }
    }

    /// Run [`fetch_user`](Self::fetch_user) in the background.
    ///
    /// The fetch is aborted if the session is torn down before it ends.
    pub fn spawn_fetch(&self) -> FetchHandle {
        let store = self.clone();
        let task = tokio::spawn(async move { store.fetch_user().await });

        let mut state = self.lock();
        state.in_flight.retain(|fetch| !fetch.is_finished());
        state.in_flight.push(task.abort_handle());

        FetchHandle::new(task)
    }

    /// Force the user to absent. Used when the token disappears.
    pub(crate) fn clear_user(&self) {
        let mut state = self.lock();
        if state.user.take().is_some() {
            debug!("User cleared");
            self.publish(&state);
        }
    }

    pub fn token(&self) -> Option<Token> {
        self.lock().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    /// True only when both a token and a user are present.
    pub fn is_logged_in(&self) -> bool {
        let state = self.lock();
        state.token.is_some() && state.user.is_some()
    }

    pub fn state(&self) -> SessionState {
        let state = self.lock();
        SessionState::of(state.token.is_some(), state.user.is_some())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Watch the session; the receiver sees a new snapshot after every
    /// mutation.
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshots.subscribe()
    }

    /// Subscribe to token-change events.
    pub fn subscribe(&self) -> broadcast::Receiver<TokenChange> {
        self.inner.changes.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &StoreState) {
        self.inner.snapshots.send_replace(state.snapshot());
    }

    fn notify(&self, change: TokenChange) {
        // No subscriber just means no reactor is running
        let _ = self.inner.changes.send(change);
        debug!(?change, "Token change raised");
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SessionStore")
            .field("token", &state.token)
            .field("user_id", &state.user.as_ref().map(|u| u.id))
            .field("epoch", &state.epoch)
            .finish()
    }
}
