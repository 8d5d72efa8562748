pub mod fetcher;
pub mod sources;
pub(crate) mod utils;

pub use fetcher::HtmlContentFetcher;
pub use sources::{create_sources, FeedSource, NewsApiConfig, NewsApiSource, SourceSpec};

pub mod prelude {
    pub use super::sources::create_sources;
    pub use ns_core::{Article, ContentFetcher, Error, FetchOutcome, NewsSource, Result};
}
