//! Page cache and its persistence backends.
//!
//! The cache is loaded once before a command runs and saved once after it:
//!
//! ```text
//! load(store) ──► PageCache (in memory, owned by the command) ──► save(store)
//! ```
//!
//! - `LocalStore`: JSON file on disk, written atomically
//! - `MemoryStore`: process-local, for tests and dry runs

pub mod local;
pub mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStore;
pub use memory::MemoryStore;

/// URL to raw body mapping as persisted by a store.
pub type Entries = BTreeMap<String, String>;

/// Trait for page cache persistence backends.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read all persisted entries.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet and an error
    /// when persisted data exists but cannot be decoded.
    async fn read(&self) -> Result<Option<Entries>>;

    /// Replace the persisted entries with `entries`.
    async fn write(&self, entries: &Entries) -> Result<()>;

    /// Human-readable location for diagnostics.
    fn describe(&self) -> String;
}

/// In-memory URL to body cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCache {
    entries: Entries,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from existing entries.
    pub fn from_entries(entries: Entries) -> Self {
        Self { entries }
    }

    /// Load the cache from `store`.
    ///
    /// Never fails: a missing cache starts empty with a notice, an unreadable
    /// one starts empty with an error report and is left untouched on disk.
    pub async fn load(store: &dyn CacheStore) -> Self {
        match store.read().await {
            Ok(Some(entries)) => {
                log::debug!(
                    "Loaded {} cached pages from {}",
                    entries.len(),
                    store.describe()
                );
                Self::from_entries(entries)
            }
            Ok(None) => {
                log::info!("Cache file not found. Initializing new cache.");
                Self::new()
            }
            Err(e) => {
                log::error!("Error reading cache file {}: {}", store.describe(), e);
                Self::new()
            }
        }
    }

    /// Persist every entry to `store`, replacing what was there.
    pub async fn save(&self, store: &dyn CacheStore) -> Result<()> {
        store.write(&self.entries).await?;
        log::debug!(
            "Saved {} cached pages to {}",
            self.entries.len(),
            store.describe()
        );
        Ok(())
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    /// Store `body` under `url`, overwriting any previous body.
    pub fn put(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.entries.insert(url.into(), body.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_overwrites() {
        let mut cache = PageCache::new();
        cache.put("http://a.test/", "one");
        cache.put("http://a.test/", "two");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("http://a.test/"), Some("two"));
        assert_eq!(cache.get("http://b.test/"), None);
    }

    #[tokio::test]
    async fn test_load_missing_store_is_empty() {
        let store = MemoryStore::new();
        let cache = PageCache::load(&store).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = MemoryStore::new();
        let mut cache = PageCache::new();
        cache.put("http://a.test/", "<h1>Привет</h1>");
        cache.put("http://b.test/", "日本語のページ");
        cache.save(&store).await.unwrap();

        let loaded = PageCache::load(&store).await;
        assert_eq!(loaded, cache);
    }

    #[tokio::test]
    async fn test_empty_round_trip() {
        let store = MemoryStore::new();
        PageCache::new().save(&store).await.unwrap();

        let loaded = PageCache::load(&store).await;
        assert!(loaded.is_empty());
        assert!(store.snapshot().unwrap().is_some());
    }
}
