use super::KeyValueStore;
use crate::error::{Result, VeridocError};
use std::fs;
use std::path::PathBuf;

/// File-backed key-value store: one `<key>.json` file per key under the
/// data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VeridocError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(VeridocError::Io)?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.key_path(key);

        // Write to a tmp file then rename so a key is never half-written.
        let tmp = self.root.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value).map_err(VeridocError::Io)?;
        fs::rename(&tmp, &path).map_err(VeridocError::Io)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(VeridocError::Io)?;
        }
        Ok(())
    }
}
