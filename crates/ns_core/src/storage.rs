use async_trait::async_trait;
use std::collections::BTreeMap;
use crate::fingerprint::Fingerprint;
use crate::types::EnrichmentRecord;
use crate::Result;

/// Whole-cache snapshot as handed to and from storage.
pub type CacheEntries = BTreeMap<Fingerprint, EnrichmentRecord>;

#[async_trait]
pub trait CacheStorage: Send + Sync {
    fn name(&self) -> &str;

    /// Load every stored entry. A missing resource is an empty cache.
    async fn load(&self) -> Result<CacheEntries>;

    /// Replace the stored cache with `entries`
    async fn save(&self, entries: &CacheEntries) -> Result<()>;
}
