//! Capability traits injected into the session store.

mod credential_slot;
mod user_source;

pub use credential_slot::CredentialSlot;
pub use user_source::UserSource;
