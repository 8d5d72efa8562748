use async_trait::async_trait;
use ns_core::{CacheEntries, CacheStorage, Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Whole-file JSON cache. Saves go to a sibling temp file that is then
/// renamed over the target, so readers only ever see a complete file.
pub struct JsonFileStorage {
    path: PathBuf,
    writes: AtomicU64,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let seq = self.writes.fetch_add(1, Ordering::Relaxed);
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cache".to_string());
        self.path
            .with_file_name(format!(".{}.{}.{}.tmp", file_name, std::process::id(), seq))
    }
}

#[async_trait]
impl CacheStorage for JsonFileStorage {
    fn name(&self) -> &str {
        "json"
    }

    async fn load(&self) -> Result<CacheEntries> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(CacheEntries::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache at {}, starting empty", self.path.display());
                Ok(CacheEntries::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &CacheEntries) -> Result<()> {
        let data = serde_json::to_vec(entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp_path, &data).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::Storage(format!(
                "Failed to write {}: {}",
                temp_path.display(),
                e
            )));
        }

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;
        debug!("💾 Saved {} cache entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}
