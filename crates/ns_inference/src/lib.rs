pub mod models;

pub use models::create_model;
pub use ns_core::SentimentModel;

use std::time::Duration;

pub const DEFAULT_MODEL: &str = "lexicon";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct InferenceConfig {
    /// Model backend: `lexicon` or `huggingface`
    pub model: String,
    pub model_url: Option<String>,
    pub api_token: Option<String>,
    /// Per-request timeout for remote backends
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            model_url: None,
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("model", &self.model)
            .field("model_url", &self.model_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::InferenceConfig;
    pub use ns_core::{Result, SentimentLabel, SentimentModel, SentimentPrediction};
}
