use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use transcript_engine::{FailureKind, FetchError};
use transcript_logging::transcript_warn;

/// Gateway-facing wrapper around a fetch failure.
///
/// The JSON body carries only the closed error vocabulary from
/// [`FailureKind`]; the underlying message is logged, never exposed.
#[derive(Debug)]
pub struct GatewayError(FetchError);

impl From<FetchError> for GatewayError {
    fn from(err: FetchError) -> Self {
        Self(err)
    }
}

impl GatewayError {
    /// HTTP status for this error. Unexpected upstream statuses pass
    /// through unchanged when they are representable.
    pub fn status_code(&self) -> StatusCode {
        match self.0.kind {
            FailureKind::InvalidIdentifier => StatusCode::BAD_REQUEST,
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::UpstreamStatus(code) => {
                StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            FailureKind::Connection => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text for the JSON error envelope. Upstream statuses get a
    /// generic tag; the passed-through status code already says which.
    fn body_message(&self) -> &'static str {
        match self.0.kind {
            FailureKind::InvalidIdentifier => "invalid identifier",
            FailureKind::NotFound => "not found",
            FailureKind::UpstreamStatus(_) => "upstream error",
            FailureKind::Connection => "connection error",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        transcript_warn!("request failed: {}", self.0);
        let body = Json(serde_json::json!({ "error": self.body_message() }));
        (self.status_code(), body).into_response()
    }
}
