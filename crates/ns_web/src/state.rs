use std::sync::Arc;
use ns_search::SearchEngine;

pub struct AppState {
    pub engine: Arc<SearchEngine>,
}
