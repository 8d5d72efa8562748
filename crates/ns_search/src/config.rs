/// Term weighting knobs for the ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct RankerConfig {
    /// Vocabulary cap, keeping the most frequent terms. `None` keeps all.
    pub max_features: Option<usize>,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum share of documents a term may appear in.
    pub max_df: f64,
    /// How many times the title is repeated in front of the body.
    pub title_weight: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            max_features: Some(1000),
            min_df: 1,
            max_df: 0.95,
            title_weight: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub page_size: usize,
    /// Words kept in a result description.
    pub preview_words: usize,
    /// Characters of content handed to the sentiment model.
    pub sentiment_char_budget: usize,
    /// Cache misses enriched at once within one page.
    pub max_enrichment_concurrency: usize,
    pub ranker: RankerConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            preview_words: 50,
            sentiment_char_budget: 512,
            max_enrichment_concurrency: 8,
            ranker: RankerConfig::default(),
        }
    }
}
