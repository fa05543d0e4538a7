use crate::{
    error::{BoardError, Result},
    storage::StorageBackend,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory storage backend.
///
/// Used by tests and as the degraded fallback when no durable backend is
/// available; the session then runs in-memory-only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| BoardError::Storage("storage mutex poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BoardError::Storage("storage mutex poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
