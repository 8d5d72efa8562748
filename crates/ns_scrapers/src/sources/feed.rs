use async_trait::async_trait;
use ns_core::{Article, NewsSource, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::utils;

#[derive(Deserialize)]
struct FeedEntry {
    title: String,
    url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Articles listed in a local JSON file: `[{"title", "url", "description"?, "content"?}]`.
#[derive(Debug, Clone)]
pub struct FeedSource {
    path: PathBuf,
    name: String,
}

impl FeedSource {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

#[async_trait]
impl NewsSource for FeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let entries: Vec<FeedEntry> = serde_json::from_str(&raw)?;
        Ok(entries
            .into_iter()
            .map(|e| Article {
                content: utils::listing_content(e.description, e.content),
                title: e.title,
                url: e.url,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_feed_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "Storm warning", "url": "https://a.example/1", "content": "Heavy rain"}},
                {{"title": "Election result", "url": "https://a.example/2", "description": "Votes counted"}},
                {{"title": "Storm recovery", "url": "https://a.example/3"}}
            ]"#
        )
        .unwrap();

        let source = FeedSource::new(file.path().to_path_buf());
        let articles = source.fetch_articles().await.unwrap();
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Storm warning", "Election result", "Storm recovery"]);
        assert_eq!(articles[1].content, "Votes counted");
        assert_eq!(articles[2].content, "");
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = FeedSource::new(PathBuf::from("/nonexistent/feed.json"));
        assert!(source.fetch_articles().await.is_err());
        assert_eq!(source.name(), "feed.json");
    }
}
