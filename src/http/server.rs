//! Router, handlers and listener

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{serve, Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::http::protocol::{ApiError, HealthResponse, VersionResponse};
use crate::insights::InsightReport;
use crate::tools::{
    self, AiInsightParams, ClassifyParams, ClassifyResponse, GrowthParams, GrowthResponse,
    RankingParams, RankingResponse, TrendParams, TrendResponse,
};
use crate::{ServerError, TrendInsightsServer};

type AppState = Arc<TrendInsightsServer>;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/api/keywords/ranking", get(ranking))
        .route("/api/keywords/growth", get(growth))
        .route("/api/keywords/classify", get(classify))
        .route("/api/trends", get(trends))
        .route("/api/ai-insight", post(ai_insight))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), ServerError> {
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, app).await?;
    Ok(())
}

fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        keywords: state.dataset().len(),
    })
}

/// GET /version
async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/keywords/ranking?year&month&limit
async fn ranking(
    State(state): State<AppState>,
    params: Result<Query<RankingParams>, QueryRejection>,
) -> Result<Json<RankingResponse>, ApiError> {
    let response = tools::keyword_ranking(state.dataset(), state.analytics(), query(params)?)?;
    Ok(Json(response))
}

/// GET /api/keywords/growth?keyword&year&month
async fn growth(
    State(state): State<AppState>,
    params: Result<Query<GrowthParams>, QueryRejection>,
) -> Result<Json<GrowthResponse>, ApiError> {
    let response = tools::keyword_growth(state.dataset(), query(params)?)?;
    Ok(Json(response))
}

/// GET /api/keywords/classify?keyword
async fn classify(
    params: Result<Query<ClassifyParams>, QueryRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    Ok(Json(tools::classify_keyword(query(params)?)?))
}

/// GET /api/trends?keywords=a,b&year&month&range
async fn trends(
    State(state): State<AppState>,
    params: Result<Query<TrendParams>, QueryRejection>,
) -> Result<Json<TrendResponse>, ApiError> {
    let response = tools::keyword_trends(state.dataset(), state.analytics(), query(params)?)?;
    Ok(Json(response))
}

/// POST /api/ai-insight
async fn ai_insight(
    State(state): State<AppState>,
    body: Result<Json<AiInsightParams>, JsonRejection>,
) -> Result<Json<InsightReport>, ApiError> {
    let Json(params) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let report = tools::generate_ai_insight(
        state.dataset(),
        state.analytics(),
        state.insights(),
        params,
    )
    .await?;
    Ok(Json(report))
}
