//! HTTP request handlers for the showreel API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::content::{writer, Collection, ContentError, NewVideo};
use crate::types::Record;

use super::AppState;

/// Build the axum router with all routes
pub(super) fn router(state: Arc<AppState>) -> axum::Router {
    use axum::routing::{get, post};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    axum::Router::new()
        .route("/api/videos.json", get(videos))
        .route("/api/create-video.json", post(create_video))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn bad_request(message: impl Into<String>) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
            details: None,
        }),
    )
}

/// Map failures to HTTP 500, keeping the cause in `details`
fn internal_error(message: &str, err: impl std::fmt::Display) -> ErrorResponse {
    tracing::error!("{}: {}", message, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: message.to_string(),
            details: Some(err.to_string()),
        }),
    )
}

// -- /api/videos.json --

async fn videos(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ErrorResponse> {
    let collection = Collection::load(&state.content_dir()).map_err(|e| {
        tracing::error!("Error fetching videos: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Failed to fetch videos".to_string(),
                details: None,
            }),
        )
    })?;

    let records: Vec<Record> = collection.to_records();
    let cache_control = format!("public, max-age={}", state.config.server.cache_max_age);

    Ok(([(header::CACHE_CONTROL, cache_control)], Json(records)))
}

// -- /api/create-video.json --

#[derive(Serialize)]
struct CreateResponse {
    success: bool,
    filename: String,
    slug: String,
    message: String,
}

async fn create_video(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<CreateResponse>, ErrorResponse> {
    const FAILED: &str = "Failed to create video post";

    if body.trim().is_empty() {
        return Err(bad_request("Request body is empty"));
    }

    let video: NewVideo = serde_json::from_str(&body).map_err(|e| internal_error(FAILED, e))?;

    let written = writer::write_post(&state.content_dir(), &video).map_err(|e| match e {
        ContentError::MissingField(_) | ContentError::InvalidDate(_) => bad_request(e.to_string()),
        ContentError::Invalid { reason, .. } => bad_request(reason),
        ContentError::Yaml { source, .. } => bad_request(format!("Invalid field value: {source}")),
        other => internal_error(FAILED, other),
    })?;

    Ok(Json(CreateResponse {
        success: true,
        filename: written.filename,
        slug: written.slug,
        message: "Video post created successfully!".to_string(),
    }))
}
