use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_store::StoreError;
use serde_json::json;
use tracing::error;

/// Errors surfaced by the HTTP layer.
///
/// Store failures pass through untouched. `BadRequest` covers faults in
/// the request itself, multipart framing and query strings, that never
/// reach the store.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Status plus the `name`/`className` pair carried in the JSON body.
    fn classify(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            Self::Store(err) => match err {
                StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NotFound", "not-found"),
                // a wrong-type upload is a fault in the request, not a
                // media-type negotiation failure, so it reports as 400
                StoreError::UnsupportedMediaType { .. } => {
                    (StatusCode::BAD_REQUEST, "BadRequest", "bad-request")
                }
                StoreError::InvalidFilename { .. } => {
                    (StatusCode::BAD_REQUEST, "BadRequest", "bad-request")
                }
                StoreError::Conflict { .. } => (StatusCode::CONFLICT, "Conflict", "conflict"),
                StoreError::PayloadTooLarge { .. } => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "PayloadTooLarge",
                    "payload-too-large",
                ),
                StoreError::RangeNotSatisfiable { .. } => (
                    StatusCode::RANGE_NOT_SATISFIABLE,
                    "RangeNotSatisfiable",
                    "range-not-satisfiable",
                ),
                StoreError::Unavailable { .. } | StoreError::Io { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GeneralError",
                    "general-error",
                ),
            },
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest", "bad-request"),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Store(err) => err.to_string(),
            Self::BadRequest(message) => message.clone(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, name, class_name) = self.classify();
        let message = self.message();
        if status.is_server_error() {
            error!("Request failed: {}", message);
        }
        let body = json!({
            "name": name,
            "message": message,
            "code": status.as_u16(),
            "className": class_name,
        });
        (status, Json(body)).into_response()
    }
}
