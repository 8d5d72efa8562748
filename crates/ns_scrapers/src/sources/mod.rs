use std::path::PathBuf;
use std::sync::Arc;
use ns_core::{NewsSource, Result};

pub mod feed;
pub mod newsapi;

pub use feed::FeedSource;
pub use newsapi::{NewsApiConfig, NewsApiSource};

/// Where the corpus comes from.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    NewsApi(NewsApiConfig),
    Feed(PathBuf),
}

/// Builds one source per spec, keeping the given order.
pub fn create_sources(specs: &[SourceSpec]) -> Result<Vec<Arc<dyn NewsSource>>> {
    specs
        .iter()
        .map(|spec| -> Result<Arc<dyn NewsSource>> {
            match spec {
                SourceSpec::NewsApi(config) => Ok(Arc::new(NewsApiSource::new(config.clone())?)),
                SourceSpec::Feed(path) => Ok(Arc::new(FeedSource::new(path.clone()))),
            }
        })
        .collect()
}
