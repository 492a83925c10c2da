//! HTTP routes.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use bulk_ingest_pipeline::{BulkIndexHandler, IngestRequest};
use bulk_ingest_shared::IngestionResult;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<BulkIndexHandler>,
}

/// Build the router serving bulk ingestion.
///
/// - `POST /api/bulk` ingests into the default index
/// - `POST /api/{index}/bulk` ingests into the named index
/// - `GET /health` reports liveness
pub fn build_router(handler: Arc<BulkIndexHandler>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/bulk", post(bulk_default))
        .route("/api/{index}/bulk", post(bulk_named))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { handler })
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn bulk_default(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IngestionResult>, AppError> {
    let result = state.handler.handle(IngestRequest::new(body.to_vec())).await?;
    Ok(Json(result))
}

async fn bulk_named(
    State(state): State<AppState>,
    Path(index): Path<String>,
    body: Bytes,
) -> Result<Json<IngestionResult>, AppError> {
    let request = IngestRequest::new(body.to_vec()).with_param("index", index);
    let result = state.handler.handle(request).await?;
    Ok(Json(result))
}
