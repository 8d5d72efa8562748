use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use super::stopwords::is_stop_word;
use crate::config::RankerConfig;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").unwrap();
}

/// Why a term space could not be built. None of these are fatal to a search;
/// the ranker treats them as "nothing matches".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorizeError {
    #[error("no documents to fit")]
    EmptyCorpus,

    #[error("empty vocabulary; documents only contain stop words")]
    EmptyVocabulary,

    #[error("max_df allows fewer documents than min_df")]
    InconsistentBounds,

    #[error("no terms remain after pruning by document frequency")]
    NoTermsRemain,
}

/// Sparse vector as `(term index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Lowercased word tokens of two or more characters, stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

fn count_terms(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

pub fn dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// A fitted term space: vocabulary and smoothed inverse document frequencies.
#[derive(Debug, Clone)]
pub struct TermSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TermSpace {
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }

    /// Projects `text` into the space as an L2-normalized tf-idf vector.
    /// Terms outside the vocabulary are dropped; a text with no known terms
    /// maps to the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&count_terms(text))
    }

    fn weigh(&self, counts: &HashMap<String, usize>) -> SparseVector {
        let mut vector: SparseVector = counts
            .iter()
            .filter_map(|(term, &count)| {
                self.vocabulary
                    .get(term)
                    .map(|&i| (i, count as f64 * self.idf[i]))
            })
            .collect();
        vector.sort_by_key(|&(i, _)| i);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }
}

/// Builds a [`TermSpace`] from a set of documents.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
    min_df: usize,
    max_df: f64,
}

impl TfidfVectorizer {
    pub fn new(config: &RankerConfig) -> Self {
        Self {
            max_features: config.max_features,
            min_df: config.min_df,
            max_df: config.max_df,
        }
    }

    /// Fits the space over `documents` and returns it with every document's
    /// vector, in input order.
    pub fn fit_transform(
        &self,
        documents: &[String],
    ) -> Result<(TermSpace, Vec<SparseVector>), VectorizeError> {
        if documents.is_empty() {
            return Err(VectorizeError::EmptyCorpus);
        }

        let counts: Vec<HashMap<String, usize>> = documents.iter().map(|d| count_terms(d)).collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        let mut tf: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, &count) in doc {
                *df.entry(term.as_str()).or_insert(0) += 1;
                *tf.entry(term.as_str()).or_insert(0) += count;
            }
        }
        if df.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n_docs = documents.len();
        let max_doc_count = self.max_df * n_docs as f64;
        if max_doc_count < self.min_df as f64 {
            return Err(VectorizeError::InconsistentBounds);
        }

        let mut kept: Vec<&str> = df
            .iter()
            .filter(|(_, d)| **d >= self.min_df && **d as f64 <= max_doc_count)
            .map(|(&term, _)| term)
            .collect();
        if kept.is_empty() {
            return Err(VectorizeError::NoTermsRemain);
        }

        if let Some(limit) = self.max_features {
            kept.sort_by(|a, b| tf[b].cmp(&tf[a]).then_with(|| a.cmp(b)));
            kept.truncate(limit);
        }
        kept.sort_unstable();

        let idf = kept
            .iter()
            .map(|term| ((1.0 + n_docs as f64) / (1.0 + df[term] as f64)).ln() + 1.0)
            .collect();
        let vocabulary = kept
            .iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i))
            .collect();

        let space = TermSpace { vocabulary, idf };
        let vectors = counts.iter().map(|c| space.weigh(c)).collect();
        Ok((space, vectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::new(&RankerConfig::default())
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("The Storm's eye, a 2024 record!"),
            vec!["storm", "eye", "2024", "record"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("of the and").is_empty());
    }

    #[test]
    fn test_smoothed_idf() {
        let (space, _) = vectorizer()
            .fit_transform(&docs(&["storm rain", "storm wind", "calm sea"]))
            .unwrap();
        // ln((1 + 3) / (1 + 2)) + 1
        let expected = (4.0f64 / 3.0).ln() + 1.0;
        assert!((space.idf("storm").unwrap() - expected).abs() < 1e-12);
        assert!(space.idf("rain").unwrap() > space.idf("storm").unwrap());
    }

    #[test]
    fn test_vectors_are_normalized() {
        let (_, vectors) = vectorizer()
            .fit_transform(&docs(&["storm storm rain", "calm sea", "rain"]))
            .unwrap();
        for v in &vectors {
            let norm: f64 = v.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_max_df_prunes_ubiquitous_terms() {
        let (space, _) = vectorizer()
            .fit_transform(&docs(&["news storm", "news vote", "news sport"]))
            .unwrap();
        assert!(!space.contains("news"));
        assert!(space.contains("storm"));
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let config = RankerConfig {
            max_features: Some(2),
            ..RankerConfig::default()
        };
        let (space, _) = TfidfVectorizer::new(&config)
            .fit_transform(&docs(&["alpha alpha alpha beta", "beta gamma", "delta"]))
            .unwrap();
        assert_eq!(space.len(), 2);
        assert!(space.contains("alpha"));
        assert!(space.contains("beta"));
    }

    #[test]
    fn test_max_features_ties_break_alphabetically() {
        let config = RankerConfig {
            max_features: Some(1),
            ..RankerConfig::default()
        };
        let (space, _) = TfidfVectorizer::new(&config)
            .fit_transform(&docs(&["zulu", "alpha"]))
            .unwrap();
        assert!(space.contains("alpha"));
        assert!(!space.contains("zulu"));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(
            vectorizer().fit_transform(&[]).unwrap_err(),
            VectorizeError::EmptyCorpus
        );
        assert_eq!(
            vectorizer().fit_transform(&docs(&["the", "of a"])).unwrap_err(),
            VectorizeError::EmptyVocabulary
        );
        assert_eq!(
            vectorizer().fit_transform(&docs(&["storm", "storm"])).unwrap_err(),
            VectorizeError::NoTermsRemain
        );
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let (space, vectors) = vectorizer()
            .fit_transform(&docs(&["storm rain", "calm sea"]))
            .unwrap();
        let query = space.transform("storm tsunami");
        assert_eq!(query.len(), 1);
        assert!(dot(&vectors[0], &query) > 0.0);
        assert_eq!(dot(&vectors[1], &query), 0.0);
        assert!(space.transform("tsunami").is_empty());
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[(0, 1.0), (2, 2.0)], &[(1, 5.0), (2, 3.0)]), 6.0);
        assert_eq!(dot(&[], &[(1, 5.0)]), 0.0);
    }
}
