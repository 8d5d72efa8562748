use std::path::PathBuf;
use std::sync::Arc;
use ns_core::{CacheStorage, Error, Result};

pub mod backends;

pub use backends::*;

pub const DEFAULT_CACHE_FILE: &str = "article_cache.json";

/// Builds the cache storage named by `storage` (`json` or `memory`).
pub fn create_storage(storage: &str, path: Option<PathBuf>) -> Result<Arc<dyn CacheStorage>> {
    match storage {
        "json" | "file" => Ok(Arc::new(JsonFileStorage::new(
            path.unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE)),
        ))),
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        other => Err(Error::Storage(format!(
            "Unknown storage backend: {} (available: json, memory)",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
    pub use ns_core::{CacheEntries, CacheStorage};
}
