use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, on, MethodFilter};
use axum::{Json, Router};
use transcript_engine::Availability;
use transcript_logging::{transcript_info, transcript_warn};

use crate::error::GatewayError;
use crate::state::SharedState;

/// Build the gateway router.
///
/// GET and HEAD on the proxy path are wired separately: HEAD runs an
/// upstream existence probe instead of downloading the document.
pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/proxy/{identifier}",
            on(MethodFilter::GET, get_document).on(MethodFilter::HEAD, head_document),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Relays the transcript PDF for `identifier` from the upstream.
async fn get_document(
    State(state): State<SharedState>,
    Path(identifier): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let payload = state.fetcher.fetch_document(&identifier).await?;
    transcript_info!("served {} ({} bytes)", payload.filename, payload.bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", payload.filename),
            ),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        payload.bytes,
    ))
}

/// Answers whether a transcript exists without relaying its body.
///
/// Failures keep the GET status mapping but stay headers-only: a HEAD
/// response never carries a JSON error envelope.
async fn head_document(
    State(state): State<SharedState>,
    Path(identifier): Path<String>,
) -> impl IntoResponse {
    let status = match state.fetcher.check_existence(&identifier).await {
        Ok(Availability::Available) => StatusCode::OK,
        Ok(Availability::Missing) => StatusCode::NOT_FOUND,
        Err(err) => {
            transcript_warn!("existence probe failed: {err}");
            GatewayError::from(err).status_code()
        }
    };
    (status, [(header::CONTENT_TYPE, "application/pdf")])
}
