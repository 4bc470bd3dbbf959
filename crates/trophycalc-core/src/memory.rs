//! In-memory credential slot.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::Result;
use crate::traits::CredentialSlot;

/// A credential slot that lives only as long as the process.
///
/// Useful for embedding the session in short-lived tools and for tests.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with `value` under `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let slot = Self::new();
        slot.values().insert(key.to_string(), value.to_string());
        slot
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.values().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let slot = MemorySlot::new();
        assert_eq!(slot.get("auth_token").unwrap(), None);

        slot.set("auth_token", "T1").unwrap();
        assert_eq!(slot.get("auth_token").unwrap().as_deref(), Some("T1"));

        slot.delete("auth_token").unwrap();
        assert_eq!(slot.get("auth_token").unwrap(), None);
    }

    #[test]
    fn deleting_missing_key_succeeds() {
        let slot = MemorySlot::new();
        slot.delete("auth_token").unwrap();
        slot.delete("auth_token").unwrap();
    }

    #[test]
    fn prepopulated_slot() {
        let slot = MemorySlot::with_value("auth_token", "T1");
        assert_eq!(slot.get("auth_token").unwrap().as_deref(), Some("T1"));
    }
}
