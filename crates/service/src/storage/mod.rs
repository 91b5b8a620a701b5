//! Client-side persisted storage.
//!
//! [`ClientStorage`] is a string key/value store holding the session.
//! [`MemoryStorage`] lives for one process,
//! [`JsonFileStorage`] persists to a JSON file between runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::ClientError;

pub mod json_file;
pub mod session;

pub use json_file::JsonFileStorage;
pub use session::{SessionStore, AUTH_TOKEN_KEY, USER_ROLE_KEY, USER_TYPE_KEY};

#[async_trait]
pub trait ClientStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Option<String>;
    async fn set_item(&self, key: &str, value: String) -> Result<(), ClientError>;
    /// Returns whether the key existed.
    async fn remove_item(&self, key: &str) -> Result<bool, ClientError>;
}

/// Process-local storage, used by tests and one-shot runs.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = items.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { items: Mutex::new(map) }
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|m| m.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ClientStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), ClientError> {
        let mut items = self.items.lock().map_err(|e| ClientError::Storage(e.to_string()))?;
        items.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<bool, ClientError> {
        let mut items = self.items.lock().map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(items.remove(key).is_some())
    }
}
