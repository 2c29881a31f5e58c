use std::sync::Arc;
use axum::{
    Router,
    routing::get,
    extract::{Path, State, Json},
    http::StatusCode,
};
use prometheus::{Encoder, TextEncoder};
use crate::bot::quote_book::QuoteBook;
use crate::observability::metrics::REGISTRY;
use crate::types::Quote;

pub struct ApiState {
    pub book: Arc<QuoteBook>,
}

pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/quotes", get(list_quotes))
        .route("/quotes/:source/:market", get(get_quote))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics() -> Result<String, StatusCode> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn list_quotes(State(state): State<Arc<ApiState>>) -> Json<Vec<Quote>> {
    Json(state.book.snapshot())
}

async fn get_quote(
    State(state): State<Arc<ApiState>>,
    Path((source, market)): Path<(String, String)>,
) -> Result<Json<Quote>, StatusCode> {
    state.book.get(&source, &market)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
