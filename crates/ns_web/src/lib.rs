use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/search", post(handlers::search))
        .route("/refresh", get(handlers::refresh))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use ns_core::{Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use ns_core::{Article, ContentFetcher, FetchOutcome, NewsSource, Result};
    use ns_inference::models::LexiconModel;
    use ns_search::{CorpusStore, EnrichmentCache, SearchConfig, SearchEngine};
    use ns_storage::MemoryStorage;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct Fixture;
    struct NoFetch;

    #[async_trait]
    impl NewsSource for Fixture {
        fn name(&self) -> &str {
            "NewsAPI"
        }

        async fn fetch_articles(&self) -> Result<Vec<Article>> {
            Ok(vec![
                Article::new("Storm warning", "Heavy rain and flood damage", "https://example.com/1"),
                Article::new("Election result", "Votes counted", "https://example.com/2"),
                Article::new("Storm recovery", "Great recovery brings hope", "https://example.com/3"),
            ])
        }
    }

    #[async_trait]
    impl ContentFetcher for NoFetch {
        async fn fetch_content(&self, _url: &str) -> FetchOutcome {
            FetchOutcome::Unavailable("offline".to_string())
        }
    }

    async fn app() -> Router {
        let cache = EnrichmentCache::open(Arc::new(MemoryStorage::new())).await.unwrap();
        let engine = SearchEngine::new(
            CorpusStore::new(vec![Arc::new(Fixture)]),
            cache,
            Arc::new(NoFetch),
            Arc::new(LexiconModel::new()),
            SearchConfig::default(),
        );
        engine.refresh().await;
        create_app(AppState {
            engine: Arc::new(engine),
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_search(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/search")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let response = app().await.oneshot(post_search(json!({ "query": "storm" }))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(handlers::CACHE_ERROR_HEADER).is_none());

        let body = json_body(response).await;
        let results = body.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "Storm warning");
        assert_eq!(results[0]["sentiment"], "NEGATIVE");
        assert_eq!(results[1]["sentiment"], "POSITIVE");
        for result in results {
            for field in ["title", "description", "url", "score", "sentiment_score", "sentiment"] {
                assert!(result.get(field).is_some(), "missing {}", field);
            }
        }
    }

    #[tokio::test]
    async fn test_search_defaults() {
        let response = app().await.oneshot(post_search(json!({ "query": "" }))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_page() {
        let response = app()
            .await
            .oneshot(post_search(json!({ "query": "storm", "page": 0 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].as_str().unwrap().contains("page"));
    }

    #[tokio::test]
    async fn test_refresh_endpoint() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/refresh").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "message": "News data refreshed", "sources": ["NewsAPI"], "count": 3 })
        );
    }
}
