pub mod cache;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod enricher;
pub mod ranker;

pub use cache::EnrichmentCache;
pub use config::{RankerConfig, SearchConfig};
pub use corpus::{Corpus, CorpusEntry, CorpusStore};
pub use engine::{RefreshSummary, SearchEngine, SearchPage, SearchRequest};
pub use enricher::Enricher;
pub use ranker::Ranker;

pub mod prelude {
    pub use super::{SearchConfig, SearchEngine, SearchPage, SearchRequest};
    pub use ns_core::{Article, EnrichmentRecord, Error, Result};
}
