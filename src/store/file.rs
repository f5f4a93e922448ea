use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{StateStore, StoreError, StoreResult};

/// File-backed store: one document per key, saved as `<key>.json` under the
/// data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("store directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // Keys double as file names, so anything that could escape the data
    // directory is rejected.
    fn document_path(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.document_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.document_path(key)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> StoreResult<()> {
        let path = self.document_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
