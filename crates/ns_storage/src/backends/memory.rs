use async_trait::async_trait;
use ns_core::{CacheEntries, CacheStorage, Result};
use tokio::sync::RwLock;

/// Keeps the saved cache in process memory only.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<CacheEntries>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: CacheEntries) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> Result<CacheEntries> {
        Ok(self.entries.read().await.clone())
    }

    async fn save(&self, entries: &CacheEntries) -> Result<()> {
        *self.entries.write().await = entries.clone();
        Ok(())
    }
}
