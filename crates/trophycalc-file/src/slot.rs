//! Credential slot stored as a JSON object on disk.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument};

use trophycalc_core::error::{Error, StorageError};
use trophycalc_core::{CredentialSlot, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// File name used by [`FileSlot::in_dir`].
pub const CREDENTIALS_FILE: &str = "credentials.json";

fn map_io(operation: &'static str, key: &str) -> impl FnOnce(io::Error) -> Error {
    let key = key.to_string();
    move |err| {
        StorageError::Io {
            operation,
            key,
            message: err.to_string(),
        }
        .into()
    }
}

/// A credential slot persisted as a flat JSON object of strings.
///
/// Every operation takes an advisory lock on a sibling `.lock` file, so
/// several processes can share the same slot. Writes go through a temporary
/// file and a rename; on Unix the file is readable by its owner only.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Use the file at `path`. Nothing is created until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Use `credentials.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CREDENTIALS_FILE))
    }

    /// Get the path of the credentials file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    /// Take the slot lock. Released when the returned file is dropped.
    fn lock(&self, operation: &'static str, key: &str, exclusive: bool) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io(operation, key))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io(operation, key))?;

        let locked = if exclusive {
            lock_file.lock_exclusive()
        } else {
            FileExt::lock_shared(&lock_file)
        };
        locked.map_err(map_io(operation, key))?;

        Ok(lock_file)
    }

    fn read_all(&self, operation: &'static str, key: &str) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(map_io(operation, key)(e)),
        };

        serde_json::from_str(&contents).map_err(|e| {
            StorageError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            }
            .into()
        })
    }

    fn write_all(
        &self,
        values: &BTreeMap<String, String>,
        operation: &'static str,
        key: &str,
    ) -> Result<()> {
        if values.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(map_io(operation, key)(e)),
                _ => Ok(()),
            };
        }

        let json = serde_json::to_string_pretty(values).map_err(|e| StorageError::Corrupt {
            message: e.to_string(),
        })?;

        let temp = self.temp_path();
        let mut file = File::create(&temp).map_err(map_io(operation, key))?;

        // Set restrictive permissions before the token lands in the file
        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(map_io(operation, key))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp, perms).map_err(map_io(operation, key))?;
        }

        file.write_all(json.as_bytes()).map_err(map_io(operation, key))?;
        file.sync_data().map_err(map_io(operation, key))?;
        fs::rename(&temp, &self.path).map_err(map_io(operation, key))?;

        Ok(())
    }
}

impl CredentialSlot for FileSlot {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _lock = self.lock("read", key, false)?;
        let mut values = self.read_all("read", key)?;
        Ok(values.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _lock = self.lock("write", key, true)?;
        let mut values = self.read_all("write", key)?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values, "write", key)?;
        debug!("Credential stored");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn delete(&self, key: &str) -> Result<()> {
        let _lock = self.lock("delete", key, true)?;
        let mut values = self.read_all("delete", key)?;
        if values.remove(key).is_some() {
            self.write_all(&values, "delete", key)?;
            debug!("Credential deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path());
        assert_eq!(slot.get("auth_token").unwrap(), None);
        assert!(!slot.path().exists());
    }

    #[test]
    fn value_survives_reopening() {
        let dir = TempDir::new().unwrap();
        FileSlot::in_dir(dir.path()).set("auth_token", "42|abc").unwrap();

        let reopened = FileSlot::in_dir(dir.path());
        assert_eq!(reopened.get("auth_token").unwrap().as_deref(), Some("42|abc"));
    }

    #[test]
    fn set_overwrites() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path());
        slot.set("auth_token", "T1").unwrap();
        slot.set("auth_token", "T2").unwrap();
        assert_eq!(slot.get("auth_token").unwrap().as_deref(), Some("T2"));
    }

    #[test]
    fn delete_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path());
        slot.set("auth_token", "T1").unwrap();
        slot.set("other", "x").unwrap();

        slot.delete("auth_token").unwrap();

        assert_eq!(slot.get("auth_token").unwrap(), None);
        assert_eq!(slot.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn deleting_last_key_removes_file() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path());
        slot.set("auth_token", "T1").unwrap();

        slot.delete("auth_token").unwrap();
        slot.delete("auth_token").unwrap();

        assert!(!slot.path().exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path().join("nested").join("data"));
        slot.set("auth_token", "T1").unwrap();
        assert!(slot.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path());
        fs::write(slot.path(), "not json").unwrap();

        let err = slot.get("auth_token").unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::in_dir(dir.path());
        slot.set("auth_token", "T1").unwrap();

        let mode = fs::metadata(slot.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
