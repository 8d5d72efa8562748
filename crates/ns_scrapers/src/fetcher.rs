use async_trait::async_trait;
use ns_core::{ContentFetcher, FetchOutcome, Result};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tracing::debug;

use crate::utils;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches an article page and keeps the text of its paragraphs.
#[derive(Debug, Clone)]
pub struct HtmlContentFetcher {
    client: Client,
}

impl HtmlContentFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        utils::parse_url(url)?;
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }
}

/// Joins the text of every `<p>` element with a single space.
pub fn extract_paragraphs(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    Ok(utils::extract_texts(&document, "p")?.join(" "))
}

#[async_trait]
impl ContentFetcher for HtmlContentFetcher {
    async fn fetch_content(&self, url: &str) -> FetchOutcome {
        let html = match self.fetch_html(url).await {
            Ok(html) => html,
            Err(e) => {
                debug!("Failed to fetch {}: {}", url, e);
                return FetchOutcome::Unavailable(e.to_string());
            }
        };

        match extract_paragraphs(&html) {
            Ok(text) => FetchOutcome::Fetched(text),
            Err(e) => FetchOutcome::Unavailable(e.to_string()),
        }
    }
}
