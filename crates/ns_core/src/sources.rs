use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Name reported to clients after a refresh
    fn name(&self) -> &str;

    /// Fetch the current article listing, in source order
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
}

/// Result of fetching an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched(String),
    Unavailable(String),
}

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the body text of the page at `url`. Never fails; problems are
    /// reported as `FetchOutcome::Unavailable`.
    async fn fetch_content(&self, url: &str) -> FetchOutcome;
}
