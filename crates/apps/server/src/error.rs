use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Request validation failures. Every variant maps to `422` with a
/// `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
    #[error("invalid path parameter: {}", .0.body_text())]
    Path(#[from] PathRejection),
    #[error("invalid path parameter: {raw:?} is not an integer ({source})")]
    Integer {
        raw: String,
        source: std::num::ParseIntError,
    },
    #[error("value must be a finite number, got {0}")]
    NonFinite(f64),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        debug!("rejecting request: {detail}");
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
