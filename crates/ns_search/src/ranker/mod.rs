use tracing::debug;

use crate::config::RankerConfig;
use crate::corpus::Corpus;

pub mod stopwords;
pub mod tfidf;

pub use tfidf::{SparseVector, TermSpace, TfidfVectorizer, VectorizeError};

/// Scores a query against every document of a corpus snapshot.
///
/// The term space is fitted over the title-weighted texts plus the bare
/// titles, and rebuilt on every call. Only the weighted texts are scored.
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Title repeated `title_weight` times, each followed by a space, then the body.
    pub fn weighted_text(&self, title: &str, content: &str) -> String {
        let mut text = format!("{} ", title).repeat(self.config.title_weight);
        text.push_str(content);
        text
    }

    /// One relevance score in `[0, 1]` per corpus document, in corpus order.
    pub fn score(&self, corpus: &Corpus, query: &str) -> Vec<f64> {
        let n = corpus.len();
        let mut documents: Vec<String> = corpus
            .entries()
            .iter()
            .map(|e| self.weighted_text(&e.article().title, e.content()))
            .collect();
        documents.extend(corpus.entries().iter().map(|e| e.article().title.clone()));

        let (space, vectors) = match TfidfVectorizer::new(&self.config).fit_transform(&documents) {
            Ok(fitted) => fitted,
            Err(e) => {
                debug!("No term space for {} documents: {}", n, e);
                return vec![0.0; n];
            }
        };

        let query_vector = space.transform(query);
        debug!(
            "🔢 Fitted {} terms over {} documents; query {:?} hits {} terms",
            space.len(),
            documents.len(),
            query,
            query_vector.len()
        );

        vectors
            .iter()
            .take(n)
            .map(|v| tfidf::dot(v, &query_vector).clamp(0.0, 1.0))
            .collect()
    }

    /// Document indices by descending score; equal scores keep corpus order.
    pub fn rank(scores: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankerConfig::default())
    }
}
