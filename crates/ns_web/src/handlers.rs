use axum::{
    extract::State,
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use ns_search::{RefreshSummary, SearchRequest};
use crate::error::ApiError;
use crate::AppState;

/// Set on search responses whose new cache entries could not be saved.
pub const CACHE_ERROR_HEADER: &str = "x-cache-persist-error";

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Response, ApiError> {
    let page = state.engine.search(&request).await?;
    let mut response = Json(page.results).into_response();
    if page.cache_error.is_some() {
        response
            .headers_mut()
            .insert(CACHE_ERROR_HEADER, HeaderValue::from_static("true"));
    }
    Ok(response)
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshSummary> {
    Json(state.engine.refresh().await)
}
