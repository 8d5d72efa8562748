use async_trait::async_trait;
use ns_core::{Article, Error, NewsSource, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::fetcher::DEFAULT_FETCH_TIMEOUT;
use crate::utils;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Clone)]
pub struct NewsApiConfig {
    pub api_key: String,
    pub country: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            country: "au".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("api_key", &"<redacted>")
            .field("country", &self.country)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<HeadlineArticle>,
}

#[derive(Deserialize)]
struct HeadlineArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
}

/// Top headlines from newsapi.org.
pub struct NewsApiSource {
    client: Client,
    config: NewsApiConfig,
}

impl NewsApiSource {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        utils::parse_url(&config.base_url)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn headlines_url(&self) -> Result<Url> {
        let endpoint = format!("{}/top-headlines", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(
            &endpoint,
            &[("country", self.config.country.as_str()), ("apiKey", self.config.api_key.as_str())],
        )
        .map_err(|e| Error::Scraping(format!("Failed to build headlines URL: {}", e)))
    }
}

fn into_articles(response: HeadlinesResponse) -> Result<Vec<Article>> {
    if response.status != "ok" {
        return Err(Error::Scraping(format!(
            "NewsAPI returned status {}: {}",
            response.status,
            response.message.unwrap_or_default()
        )));
    }

    Ok(response
        .articles
        .into_iter()
        .filter_map(|a| {
            let title = a.title?;
            let url = a.url?;
            Some(Article {
                content: utils::listing_content(a.description, a.content),
                title,
                url,
            })
        })
        .collect())
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let url = self.headlines_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .json::<HeadlinesResponse>()
            .await?;

        let articles = into_articles(response)?;
        info!("📰 NewsAPI listed {} articles", articles.len());
        Ok(articles)
    }
}
