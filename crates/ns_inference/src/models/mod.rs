use std::sync::Arc;
use ns_core::{Error, Result, SentimentModel};
use crate::InferenceConfig;

pub mod huggingface;
pub mod lexicon;

pub use huggingface::HuggingFaceModel;
pub use lexicon::LexiconModel;

pub fn create_model(config: &InferenceConfig) -> Result<Arc<dyn SentimentModel>> {
    match config.model.to_lowercase().as_str() {
        "lexicon" => Ok(Arc::new(LexiconModel::new())),
        "huggingface" | "hf" => Ok(Arc::new(HuggingFaceModel::new(
            config.model_url.clone(),
            config.api_token.clone(),
            config.timeout,
        )?)),
        other => Err(Error::Inference(format!(
            "Unknown sentiment model: {} (available: lexicon, huggingface)",
            other
        ))),
    }
}
