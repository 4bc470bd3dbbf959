//! Session context: a store plus its reactor.

use tracing::info;

use trophycalc_core::{CredentialSlot, Result, UserSource};

use crate::reactor::Reactor;
use crate::state::{SessionState, Snapshot};
use crate::store::SessionStore;

/// The session of one running application.
///
/// Created once at start-up and passed to whatever needs the session;
/// dropping it stops the reactor.
#[derive(Debug)]
pub struct SessionContext {
    store: SessionStore,
    reactor: Reactor,
}

impl SessionContext {
    /// Open the store from `slot` and start its reactor.
    ///
    /// A token restored from the slot is fetched right away.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the slot cannot be read.
    pub fn start(
        slot: impl CredentialSlot + 'static,
        source: impl UserSource + 'static,
    ) -> Result<Self> {
        let store = SessionStore::open(slot, source)?;
        let reactor = Reactor::spawn(&store);
        info!(state = ?store.state(), "Session started");
        Ok(Self { store, reactor })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Wait until the session is no longer waiting on a user fetch.
    ///
    /// Never times out: a fetch that hangs keeps the session waiting.
    pub async fn settled(&self) -> Snapshot {
        let mut snapshots = self.store.watch();
        let settled = snapshots
            .wait_for(|snapshot| snapshot.state() != SessionState::TokenNoUser)
            .await
            .map(|snapshot| snapshot.clone());

        match settled {
            Ok(snapshot) => snapshot,
            Err(_) => self.store.snapshot(),
        }
    }

    /// Stop the reactor and hand back the store.
    pub fn into_store(self) -> SessionStore {
        let Self { store, reactor } = self;
        reactor.shutdown();
        store
    }
}
