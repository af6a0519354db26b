use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    MissingTicker,
    NewsNotConfigured,
    /// The caller submitted articles the aggregator refuses.
    InvalidArticles(String),
    Core(ns_core::Error),
}

impl From<ns_core::Error> for ApiError {
    fn from(e: ns_core::Error) -> Self {
        ApiError::Core(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingTicker => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "ticker query param is required" }),
            ),
            ApiError::NewsNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Missing NEWSAPI_KEY in server environment." }),
            ),
            ApiError::InvalidArticles(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "Invalid articles", "detail": detail }),
            ),
            ApiError::Core(ns_core::Error::Upstream { status, detail }) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": "NewsAPI error", "detail": detail }),
            ),
            ApiError::Core(e) => {
                error!("❌ {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server error", "detail": e.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
