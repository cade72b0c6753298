//! Wire types and error mapping for the HTTP API
//!
//! Every error response has the same shape: `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::insights::InsightError;
use crate::storage::DatasetError;
use crate::tools::ToolError;

/// GET /health body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Keywords in the loaded dataset
    pub keywords: usize,
}

/// GET /version body
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors returned from handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Query string or body could not be decoded
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Tool(err) => match err {
                ToolError::InvalidParams(_) | ToolError::Domain(_) => StatusCode::BAD_REQUEST,
                ToolError::Dataset(DatasetError::KeywordNotFound(_)) => StatusCode::NOT_FOUND,
                ToolError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ToolError::Insight(insight) => match insight {
                    InsightError::Validation(_) => StatusCode::BAD_REQUEST,
                    InsightError::Busy => StatusCode::CONFLICT,
                    InsightError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    InsightError::LanguageModel(_) => StatusCode::BAD_GATEWAY,
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
