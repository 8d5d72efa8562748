use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use ns_core::{Error, Result, SentimentModel, SentimentPrediction};

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/nlptown/bert-base-multilingual-uncased-sentiment";

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Failed { error: String },
}

/// Five star review classifier served by the Hugging Face inference API.
pub struct HuggingFaceModel {
    client: Client,
    api_token: Option<String>,
    url: Url,
}

impl HuggingFaceModel {
    pub fn new(model_url: Option<String>, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let raw = model_url.unwrap_or_else(|| DEFAULT_MODEL_URL.to_string());
        let url = Url::parse(&raw)
            .map_err(|e| Error::Inference(format!("Invalid model URL {}: {}", raw, e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_token,
            url,
        })
    }
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("api_token", &"<redacted>")
            .field("url", &self.url.as_str())
            .finish()
    }
}

/// Parses labels of the form `"1 star"` .. `"5 stars"`.
fn parse_stars(label: &str) -> Option<u8> {
    let stars = label.split_whitespace().next()?.parse::<u8>().ok()?;
    (1..=5).contains(&stars).then_some(stars)
}

fn best_prediction(response: ClassifyResponse) -> Result<SentimentPrediction> {
    let labels = match response {
        ClassifyResponse::Batched(mut batches) if !batches.is_empty() => batches.swap_remove(0),
        ClassifyResponse::Batched(_) => Vec::new(),
        ClassifyResponse::Flat(labels) => labels,
        ClassifyResponse::Failed { error } => {
            warn!("⚠️ Inference API returned an error: {}", error);
            return Err(Error::Inference(error));
        }
    };

    let best = labels
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| Error::Inference("Empty classification response".to_string()))?;

    let stars = parse_stars(&best.label)
        .ok_or_else(|| Error::Inference(format!("Unexpected sentiment label: {}", best.label)))?;
    debug!("Classified as {} ({:.3})", best.label, best.score);

    Ok(SentimentPrediction {
        stars,
        score: best.score,
    })
}

#[async_trait]
impl SentimentModel for HuggingFaceModel {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, text: &str) -> Result<SentimentPrediction> {
        let mut request = self.client.post(self.url.clone()).json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.json::<ClassifyResponse>().await?;
        best_prediction(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stars() {
        assert_eq!(parse_stars("1 star"), Some(1));
        assert_eq!(parse_stars("5 stars"), Some(5));
        assert_eq!(parse_stars("6 stars"), None);
        assert_eq!(parse_stars("POSITIVE"), None);
    }

    #[test]
    fn test_best_prediction_batched() {
        let response: ClassifyResponse = serde_json::from_str(
            r#"[[{"label": "1 star", "score": 0.05}, {"label": "4 stars", "score": 0.61}, {"label": "5 stars", "score": 0.2}]]"#,
        )
        .unwrap();
        let prediction = best_prediction(response).unwrap();
        assert_eq!(prediction.stars, 4);
        assert_eq!(prediction.score, 0.61);
    }

    #[test]
    fn test_best_prediction_flat() {
        let response: ClassifyResponse =
            serde_json::from_str(r#"[{"label": "2 stars", "score": 0.7}]"#).unwrap();
        assert_eq!(best_prediction(response).unwrap().stars, 2);
    }

    #[test]
    fn test_error_payload() {
        let response: ClassifyResponse =
            serde_json::from_str(r#"{"error": "Model is currently loading"}"#).unwrap();
        let err = best_prediction(response).unwrap_err();
        assert!(err.to_string().contains("currently loading"));
    }

    #[test]
    fn test_invalid_url() {
        let timeout = Duration::from_secs(5);
        assert!(HuggingFaceModel::new(Some("not a url".to_string()), None, timeout).is_err());
        assert!(HuggingFaceModel::new(None, None, timeout).is_ok());
    }

    #[tokio::test]
    async fn test_unresponsive_endpoint_times_out() {
        // Accepts the connection but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let model = HuggingFaceModel::new(
            Some(format!("http://{}/classify", addr)),
            None,
            Duration::from_millis(200),
        )
        .unwrap();
        let outcome = tokio::time::timeout(Duration::from_secs(5), model.classify("storm")).await;
        assert!(matches!(outcome, Ok(Err(Error::Http(_)))));
    }
}
