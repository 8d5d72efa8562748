use std::collections::HashSet;
use std::fmt;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use ns_core::{Result, SentimentModel, SentimentPrediction};

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap();
    static ref POSITIVE: HashSet<&'static str> = [
        "good", "great", "excellent", "positive", "success", "successful", "win", "wins", "won",
        "growth", "gain", "gains", "improve", "improved", "improvement", "recovery", "recover",
        "hope", "hopeful", "happy", "celebrate", "celebrates", "celebration", "strong", "boost",
        "record", "best", "benefit", "benefits", "safe", "rescue", "rescued", "praise", "praised",
        "love", "peace", "progress", "support", "thrive", "breakthrough", "relief", "boom",
    ]
    .into_iter()
    .collect();
    static ref NEGATIVE: HashSet<&'static str> = [
        "bad", "poor", "terrible", "negative", "fail", "failed", "failure", "loss", "losses",
        "lose", "lost", "crisis", "storm", "warning", "death", "dead", "dies", "died", "kill",
        "killed", "attack", "war", "crash", "collapse", "decline", "fear", "fears", "threat",
        "danger", "dangerous", "damage", "damaged", "injured", "victim", "victims", "fraud",
        "scandal", "protest", "disaster", "flood", "fire", "sad", "worst", "cut", "cuts",
    ]
    .into_iter()
    .collect();
    static ref NEGATIONS: HashSet<&'static str> =
        ["not", "no", "never", "without", "isn't", "wasn't", "don't", "didn't", "won't"]
            .into_iter()
            .collect();
}

/// Offline word-list classifier with the same five star output as the hosted
/// model. Deterministic for a given text.
pub struct LexiconModel;

impl fmt::Debug for LexiconModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconModel").finish()
    }
}

impl LexiconModel {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(&self, text: &str) -> SentimentPrediction {
        let lowered = text.to_lowercase();
        let mut positive = 0usize;
        let mut negative = 0usize;
        let mut negated = false;

        for word in WORD.find_iter(&lowered).map(|m| m.as_str()) {
            if NEGATIONS.contains(word) {
                negated = true;
                continue;
            }
            let polarity = if POSITIVE.contains(word) {
                1
            } else if NEGATIVE.contains(word) {
                -1
            } else {
                0
            };
            match (polarity, negated) {
                (1, false) | (-1, true) => positive += 1,
                (-1, false) | (1, true) => negative += 1,
                _ => {}
            }
            if polarity != 0 {
                negated = false;
            }
        }

        let hits = positive + negative;
        if hits == 0 {
            return SentimentPrediction { stars: 3, score: 0.4 };
        }

        let polarity = (positive as f64 - negative as f64) / hits as f64;
        let stars = if polarity >= 0.6 {
            5
        } else if polarity >= 0.2 {
            4
        } else if polarity > -0.2 {
            3
        } else if polarity > -0.6 {
            2
        } else {
            1
        };
        // More evidence, more confidence; never reaches 1.
        let score = 0.4 + 0.6 * (hits as f64 / (hits as f64 + 3.0));
        SentimentPrediction { stars, score }
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<SentimentPrediction> {
        Ok(self.predict(text))
    }
}
