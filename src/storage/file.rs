//! Directory-backed store: one JSON file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::errors::{Result, VaultError};

/// A `KeyValueStore` that keeps each key in `<dir>/<key>.json`.
///
/// Writes go to a temp file in the same directory and are renamed over
/// the target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.  The directory is created lazily
    /// on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file that holds `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.dir).map_err(|e| {
            VaultError::Storage(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp_path, value).map_err(|e| {
            VaultError::Storage(format!("failed to write {}: {e}", tmp_path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, perms).map_err(|e| {
                VaultError::Storage(format!("failed to restrict permissions: {e}"))
            })?;
        }

        fs::rename(&tmp_path, &path).map_err(|e| {
            VaultError::Storage(format!("failed to replace {}: {e}", path.display()))
        })?;

        tracing::debug!(key, path = %path.display(), "wrote store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::Storage(format!(
                "failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > 128 {
        return Err(VaultError::InvalidInput(
            "storage key must be 1 to 128 characters".into(),
        ));
    }
    if key.starts_with('.') {
        return Err(VaultError::InvalidInput(format!(
            "storage key '{key}' cannot start with a period"
        )));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(VaultError::InvalidInput(format!(
            "storage key '{key}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("vault").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("store"));

        store.set("vault", "{\"a\":1}").unwrap();
        assert_eq!(store.get("vault").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(store.path_for("vault").unwrap().exists());
    }

    #[test]
    fn set_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("vault", "one").unwrap();
        store.set("vault", "two").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["vault.json".to_string()]);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("vault", "x").unwrap();
        store.remove("vault").unwrap();
        store.remove("vault").unwrap();
        assert_eq!(store.get("vault").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("a/b", "x").is_err());
        assert!(store.set("", "x").is_err());
        assert!(store.set(".hidden", "x").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("vault", "x").unwrap();

        let mode = fs::metadata(store.path_for("vault").unwrap())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_directory_is_a_storage_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o500)).unwrap();

        let store = FileStore::new(&locked);
        let result = store.set("vault", "x");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o700)).unwrap();

        // Running as root bypasses directory permissions.
        if let Err(e) = result {
            assert!(e.is_persistence_failure());
        }
    }
}
