use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directions API error: {0}")]
    DirectionsApi(String),

    #[error("Narration unavailable: {0}")]
    Narration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No infrastructure nearby: {0}")]
    NoInfrastructureNearby(String),

    #[error("No route could be computed: {0}")]
    NoRouteComputed(String),

    #[error("Infrastructure snapshot error: {0}")]
    Snapshot(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DirectionsApi(ref e) => {
                tracing::error!("Directions API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::Narration(ref e) => {
                tracing::warn!("Narration unavailable: {}", e);
                (StatusCode::BAD_GATEWAY, "Narration service error")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::InvalidInput(ref e) => (StatusCode::UNPROCESSABLE_ENTITY, e.as_str()),
            AppError::NoInfrastructureNearby(ref e) => {
                tracing::info!("No infrastructure nearby: {}", e);
                (StatusCode::NOT_FOUND, e.as_str())
            }
            AppError::NoRouteComputed(ref e) => {
                tracing::info!("No route computed: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.as_str())
            }
            AppError::Snapshot(ref e) => {
                tracing::warn!("Infrastructure snapshot error: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
