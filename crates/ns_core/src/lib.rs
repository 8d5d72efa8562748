pub mod error;
pub mod fingerprint;
pub mod models;
pub mod sources;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use models::SentimentModel;
pub use sources::{ContentFetcher, FetchOutcome, NewsSource};
pub use storage::{CacheEntries, CacheStorage};
pub use types::{Article, EnrichmentRecord, SentimentLabel, SentimentPrediction};
