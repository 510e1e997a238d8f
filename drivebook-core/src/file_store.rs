//! File-backed key-value store: one `<key>.json` file per key.

use std::path::PathBuf;

use crate::error::{DriveBookError, DriveBookResult};
use crate::ports::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DriveBookResult<Option<String>> {
        let path = self.path_for(key);

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DriveBookError::Storage(format!(
                "Could not read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> DriveBookResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            DriveBookError::Storage(format!("Could not create {}: {e}", self.dir.display()))
        })?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote store file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("lessons").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("lessons", "[]").unwrap();
        store.set("lessons", "[1]").unwrap();

        assert_eq!(store.get("lessons").unwrap().as_deref(), Some("[1]"));
        assert!(!dir.path().join("nested/lessons.json.tmp").exists());
    }
}
