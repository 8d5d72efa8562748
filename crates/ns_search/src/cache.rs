use std::sync::Arc;
use ns_core::{CacheEntries, CacheStorage, EnrichmentRecord, Fingerprint, Result};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Fingerprint → enrichment map shared by all searches, saved whole to a
/// [`CacheStorage`].
pub struct EnrichmentCache {
    entries: RwLock<CacheEntries>,
    storage: Arc<dyn CacheStorage>,
    persist_lock: Mutex<()>,
}

impl EnrichmentCache {
    /// Loads whatever `storage` holds; an absent store is an empty cache.
    pub async fn open(storage: Arc<dyn CacheStorage>) -> Result<Self> {
        let entries = storage.load().await?;
        info!("🏦 Loaded {} cached enrichments from {} storage", entries.len(), storage.name());
        Ok(Self {
            entries: RwLock::new(entries),
            storage,
            persist_lock: Mutex::new(()),
        })
    }

    pub async fn get(&self, fingerprint: &Fingerprint) -> Option<EnrichmentRecord> {
        self.entries.read().await.get(fingerprint).cloned()
    }

    /// Inserts or overwrites the entry for `fingerprint`.
    pub async fn put(&self, fingerprint: Fingerprint, record: EnrichmentRecord) {
        self.entries.write().await.insert(fingerprint, record);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Writes the full mapping to storage. Saves are serialized so a slower
    /// older snapshot never lands after a newer one.
    pub async fn persist(&self) -> Result<()> {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.entries.read().await.clone();
        self.storage.save(&snapshot).await
    }
}
