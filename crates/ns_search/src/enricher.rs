use std::sync::Arc;
use ns_core::{ContentFetcher, EnrichmentRecord, FetchOutcome, SentimentLabel, SentimentModel};
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::corpus::CorpusEntry;

pub const ELLIPSIS: &str = "...";

/// First `words` whitespace-separated words joined by single spaces, with an
/// ellipsis when anything was cut. Short content is returned verbatim.
pub fn describe(content: &str, words: usize) -> String {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() > words {
        let mut description = tokens[..words].join(" ");
        description.push_str(ELLIPSIS);
        description
    } else {
        content.to_string()
    }
}

/// At most `budget` characters from the start of `content`.
pub fn truncate_chars(content: &str, budget: usize) -> &str {
    match content.char_indices().nth(budget) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}

/// Outcome of enriching one article.
#[derive(Debug, Clone)]
pub struct Enriched {
    pub record: EnrichmentRecord,
    /// False when the sentiment model failed and the record carries a
    /// placeholder; such records are served but not cached.
    pub cacheable: bool,
}

/// Fills missing content, builds the preview and classifies sentiment.
pub struct Enricher {
    fetcher: Arc<dyn ContentFetcher>,
    model: Arc<dyn SentimentModel>,
    preview_words: usize,
    sentiment_char_budget: usize,
}

impl Enricher {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, model: Arc<dyn SentimentModel>, config: &SearchConfig) -> Self {
        Self {
            fetcher,
            model,
            preview_words: config.preview_words,
            sentiment_char_budget: config.sentiment_char_budget,
        }
    }

    /// Body text for `entry`, fetching it once when the listing had none.
    /// An unavailable page yields the empty string.
    pub async fn resolve_content(&self, entry: &CorpusEntry) -> String {
        if !entry.needs_content() {
            return entry.content().to_string();
        }

        let url = &entry.article().url;
        match self.fetcher.fetch_content(url).await {
            FetchOutcome::Fetched(text) => {
                entry.fill_content(text);
                entry.content().to_string()
            }
            FetchOutcome::Unavailable(reason) => {
                warn!("⚠️ Content unavailable for {}: {}", url, reason);
                String::new()
            }
        }
    }

    pub async fn enrich(&self, entry: &CorpusEntry, score: f64) -> Enriched {
        let article = entry.article();
        let content = self.resolve_content(entry).await;
        let description = describe(&content, self.preview_words);

        let sample = truncate_chars(&content, self.sentiment_char_budget);
        let (sentiment_score, sentiment_label, cacheable) = match self.model.classify(sample).await {
            Ok(prediction) => (prediction.score, prediction.label(), true),
            Err(e) => {
                warn!("⚠️ Sentiment model {} failed for {}: {}", self.model.name(), article.url, e);
                (0.0, SentimentLabel::Neutral, false)
            }
        };
        debug!("🧠 {} -> {} ({:.3})", article.title, sentiment_label, sentiment_score);

        Enriched {
            record: EnrichmentRecord {
                title: article.title.clone(),
                description,
                url: article.url.clone(),
                score,
                sentiment_score,
                sentiment_label,
            },
            cacheable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ns_core::{Article, Error, Result, SentimentPrediction};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
        body: Option<String>,
    }

    #[async_trait]
    impl ContentFetcher for CountingFetcher {
        async fn fetch_content(&self, _url: &str) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Some(body) => FetchOutcome::Fetched(body.clone()),
                None => FetchOutcome::Unavailable("timed out".to_string()),
            }
        }
    }

    #[derive(Debug, Default)]
    struct RecordingModel {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl SentimentModel for RecordingModel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn classify(&self, text: &str) -> Result<SentimentPrediction> {
            self.seen.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(Error::Inference("model offline".to_string()));
            }
            Ok(SentimentPrediction { stars: 2, score: 0.83 })
        }
    }

    fn enricher(fetcher: Arc<CountingFetcher>, model: Arc<RecordingModel>) -> Enricher {
        Enricher::new(fetcher, model, &SearchConfig::default())
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("short  text", 50), "short  text");
        let long = (1..=60).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let expected = (1..=50).map(|i| i.to_string()).collect::<Vec<_>>().join(" ") + "...";
        assert_eq!(describe(&long, 50), expected);
        let exact = (1..=50).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(describe(&exact, 50), exact);
        assert_eq!(describe("", 50), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[tokio::test]
    async fn test_listed_content_is_not_fetched() {
        let fetcher = Arc::new(CountingFetcher::default());
        let model = Arc::new(RecordingModel::default());
        let entry = CorpusEntry::new(Article::new("Storm", "Heavy rain", "https://example.com/1"));

        let enriched = enricher(fetcher.clone(), model.clone()).enrich(&entry, 0.4).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(enriched.cacheable);
        assert_eq!(enriched.record.description, "Heavy rain");
        assert_eq!(enriched.record.score, 0.4);
        assert_eq!(enriched.record.sentiment_score, 0.83);
        assert_eq!(enriched.record.sentiment_label, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_missing_content_is_fetched_once() {
        let fetcher = Arc::new(CountingFetcher {
            body: Some("Fetched body".to_string()),
            ..CountingFetcher::default()
        });
        let model = Arc::new(RecordingModel::default());
        let enricher = enricher(fetcher.clone(), model.clone());
        let entry = CorpusEntry::new(Article::new("Storm", "", "https://example.com/1"));

        let first = enricher.enrich(&entry, 0.1).await;
        let second = enricher.enrich(&entry, 0.2).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(entry.content(), "Fetched body");
        assert_eq!(first.record.description, second.record.description);
        assert_eq!(first.record.sentiment_score, second.record.sentiment_score);
        assert_eq!(first.record.sentiment_label, second.record.sentiment_label);
    }

    #[tokio::test]
    async fn test_unavailable_content_degrades_to_empty() {
        let fetcher = Arc::new(CountingFetcher::default());
        let model = Arc::new(RecordingModel::default());
        let enricher = enricher(fetcher.clone(), model.clone());
        let entry = CorpusEntry::new(Article::new("Storm", "", "https://example.com/1"));

        let enriched = enricher.enrich(&entry, 0.0).await;
        assert_eq!(enriched.record.description, "");
        assert_eq!(model.seen.lock().unwrap().as_slice(), [""]);

        // Still missing, so the next enrichment tries again.
        assert!(entry.needs_content());
        enricher.enrich(&entry, 0.0).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sentiment_sees_bounded_prefix() {
        let fetcher = Arc::new(CountingFetcher::default());
        let model = Arc::new(RecordingModel::default());
        let entry = CorpusEntry::new(Article::new("Long", "x".repeat(2000), "https://example.com/1"));

        enricher(fetcher, model.clone()).enrich(&entry, 0.0).await;
        assert_eq!(model.seen.lock().unwrap()[0].chars().count(), 512);
    }

    #[tokio::test]
    async fn test_model_failure_is_not_cacheable() {
        let fetcher = Arc::new(CountingFetcher::default());
        let model = Arc::new(RecordingModel {
            fail: true,
            ..RecordingModel::default()
        });
        let entry = CorpusEntry::new(Article::new("Storm", "Heavy rain", "https://example.com/1"));

        let enriched = enricher(fetcher, model).enrich(&entry, 0.3).await;
        assert!(!enriched.cacheable);
        assert_eq!(enriched.record.sentiment_label, SentimentLabel::Neutral);
        assert_eq!(enriched.record.sentiment_score, 0.0);
        assert_eq!(enriched.record.description, "Heavy rain");
    }
}
