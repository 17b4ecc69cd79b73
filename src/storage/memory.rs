//! In-memory cache store.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::{CacheStore, Entries};

/// Cache store that keeps the persisted entries in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Entries>>,
}

impl MemoryStore {
    /// Create a store with nothing persisted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `entries`.
    pub fn with_entries(entries: Entries) -> Self {
        Self {
            saved: Mutex::new(Some(entries)),
        }
    }

    /// Copy of the currently persisted entries.
    pub fn snapshot(&self) -> Result<Option<Entries>> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .map_err(|_| AppError::cache_load("memory store lock poisoned"))
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn read(&self) -> Result<Option<Entries>> {
        self.snapshot()
    }

    async fn write(&self, entries: &Entries) -> Result<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| AppError::cache_save("memory store lock poisoned"))?;
        *saved = Some(entries.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
