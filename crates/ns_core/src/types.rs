use serde::{Deserialize, Serialize};

/// A news article as listed by a source.
///
/// `content` may be empty when the listing carries no body text; the enricher
/// then fetches it from `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Collapses a 1-5 star rating into three labels.
    pub fn from_stars(stars: u8) -> Self {
        match stars {
            0..=2 => SentimentLabel::Negative,
            3 => SentimentLabel::Neutral,
            _ => SentimentLabel::Positive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output of a five level sentiment classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentPrediction {
    /// Star rating in `1..=5`.
    pub stars: u8,
    /// Classifier confidence for `stars`, in `[0, 1]`.
    pub score: f64,
}

impl SentimentPrediction {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_stars(self.stars)
    }
}

/// A search result, also the unit stored in the enrichment cache.
///
/// Everything but `score` is query independent. `score` is replaced with the
/// live relevance every time the record is served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub title: String,
    pub description: String,
    pub url: String,
    pub score: f64,
    pub sentiment_score: f64,
    #[serde(rename = "sentiment")]
    pub sentiment_label: SentimentLabel,
}

impl EnrichmentRecord {
    /// Returns a copy carrying `score` in place of the cached one.
    pub fn with_score(&self, score: f64) -> Self {
        Self {
            score,
            ..self.clone()
        }
    }
}
