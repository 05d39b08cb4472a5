use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Validation failures reject the whole query; nothing is retried and no
/// partial results are returned.
#[derive(Debug, Error, PartialEq)]
pub enum DiscoveryError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for DiscoveryError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            DiscoveryError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            DiscoveryError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        let body = json!({
            "statusCode": status.as_u16(),
            "message": self.to_string(),
            "error": error,
        });

        (status, Json(body)).into_response()
    }
}
