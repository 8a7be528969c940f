use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use business::domain::cart::store::CartStore;
use business::domain::errors::StoreError;

/// Device-local cart store: one JSON file per key under `root`.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a reader never observes a half-written snapshot.
pub struct FileCartStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCartStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_key(key) {
            return Err(StoreError::invalid_key());
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[async_trait]
impl CartStore for FileCartStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::read(e)),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!("{}.json.tmp", key));

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.root)
            .await
            .map_err(StoreError::write)?;
        fs::write(&tmp, value).await.map_err(StoreError::write)?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::write(e));
        }

        tracing::debug!(key, bytes = value.len(), "cart snapshot written");
        Ok(())
    }
}
