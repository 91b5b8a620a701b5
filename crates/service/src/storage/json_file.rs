use std::{collections::HashMap, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::warn;

use super::ClientStorage;
use crate::errors::ClientError;

/// JSON file-backed string map.
///
/// Every mutation rewrites the whole file; the map is a handful of keys.
pub struct JsonFileStorage {
    inner: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
}

impl JsonFileStorage {
    /// Open the store at `path`. A missing file is created empty; one that
    /// holds invalid JSON is treated as empty and overwritten on the next
    /// write. Any other I/O failure is returned.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ClientError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::Storage(format!("{}: {e}", parent.display())))?;
        }

        let map: HashMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "session file is not valid JSON; starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() != ErrorKind::NotFound => {
                return Err(ClientError::Storage(format!("{}: {e}", file_path.display())));
            }
            Err(_) => {
                let empty: HashMap<String, String> = HashMap::new();
                fs::write(&file_path, b"{}")
                    .await
                    .map_err(|e| ClientError::Storage(e.to_string()))?;
                empty
            }
        };

        Ok(Self { inner: RwLock::new(map), file_path })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }

    async fn save(&self, map: &HashMap<String, String>) -> Result<(), ClientError> {
        let data = serde_json::to_vec_pretty(map).map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| ClientError::Storage(e.to_string()))
    }
}

#[async_trait]
impl ClientStorage for JsonFileStorage {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.inner.read().await.get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), ClientError> {
        let mut map = self.inner.write().await;
        map.insert(key.to_string(), value);
        self.save(&map).await
    }

    async fn remove_item(&self, key: &str) -> Result<bool, ClientError> {
        let mut map = self.inner.write().await;
        let existed = map.remove(key).is_some();
        if existed {
            self.save(&map).await?;
        }
        Ok(existed)
    }
}
