//! HTTP routes and handlers.

use crate::domain::{ApiError, GatewayConfig};
use crate::middleware::{create_cors_layer, TimeoutLayer, TracingLayer};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::ScoreRecord;
use std::sync::Arc;
use stirixi_telemetry::encode_metrics;
use sx_03_score_records::{ScoreInput, ScoreRecordApi};
use tower::ServiceBuilder;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub scores: Arc<dyn ScoreRecordApi>,
    pub service_name: String,
}

/// `?limit=` on the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Build the full router with its middleware stack.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new())
        .layer(TimeoutLayer::new(&config.timeouts));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route(
            "/api/v1/engineers/:engineer_id/scores",
            get(list_scores).post(publish_score),
        )
        .route(
            "/api/v1/engineers/:engineer_id/scores/latest",
            get(latest_score),
        )
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(middleware)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Stirixi AI ATL API",
        "version": crate::VERSION,
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.service_name,
        "version": crate::VERSION,
        "issuer": state.scores.issuer().to_base58(),
    }))
}

async fn metrics() -> Response {
    match encode_metrics() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => ApiError::internal(e.to_string()).into_response(),
    }
}

/// POST /api/v1/engineers/{engineer_id}/scores
///
/// Publication runs on its own task: once the ledger has accepted the
/// transaction the record is still persisted even if the client has gone
/// away or the request timed out.
async fn publish_score(
    State(state): State<AppState>,
    Path(engineer_id): Path<String>,
    body: Result<Json<ScoreInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ScoreRecord>), ApiError> {
    let Json(input) = body?;
    let scores = Arc::clone(&state.scores);

    let outcome = tokio::spawn(async move { scores.publish(&engineer_id, input).await }).await;

    match outcome {
        Ok(Ok(record)) => Ok((StatusCode::CREATED, Json(record))),
        Ok(Err(e)) => Err(e.into()),
        Err(join_error) => {
            error!(error = %join_error, "[sx-04] Publish task aborted");
            Err(ApiError::internal("score publication task failed"))
        }
    }
}

/// GET /api/v1/engineers/{engineer_id}/scores?limit=N
async fn list_scores(
    State(state): State<AppState>,
    Path(engineer_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError> {
    let Query(query) = query?;
    let records = state.scores.list(&engineer_id, query.limit).await?;
    Ok(Json(records))
}

/// GET /api/v1/engineers/{engineer_id}/scores/latest
async fn latest_score(
    State(state): State<AppState>,
    Path(engineer_id): Path<String>,
) -> Result<Json<Option<ScoreRecord>>, ApiError> {
    let record = state.scores.latest(&engineer_id).await?;
    Ok(Json(record))
}
