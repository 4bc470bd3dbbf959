//! Persisted credential slot trait.

use crate::Result;

/// Durable key-value storage for the bearer token.
///
/// Reads happen once at start-up and writes on every token change, both on
/// the caller's thread, so implementations are synchronous. A missing key is
/// `Ok(None)`; deleting a missing key succeeds.
pub trait CredentialSlot: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: CredentialSlot + ?Sized> CredentialSlot for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
