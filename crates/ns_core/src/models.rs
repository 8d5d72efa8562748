use async_trait::async_trait;
use std::fmt;
use crate::types::SentimentPrediction;
use crate::Result;

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify text on a five star scale
    async fn classify(&self, text: &str) -> Result<SentimentPrediction>;
}
