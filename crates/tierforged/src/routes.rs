//! API routes for tierforged.

use crate::prompt;
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tierforge_common::{ErrorResponse, GenerateRequest, GenerateResponse, HealthResponse};
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

/// User-facing message when the free preview is used up.
pub const QUOTA_MESSAGE: &str = "Free limit reached. Join waitlist for full access.";

/// User-facing message for an absent or empty topic.
pub const MISSING_TOPIC_MESSAGE: &str = "Missing lesson topic";

/// Generic message for any upstream or internal failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate tasks";

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// ============================================================================
// Generation Routes
// ============================================================================

pub fn generate_routes() -> Router<AppStateArc> {
    Router::new().route("/api/generate", post(generate_tasks))
}

async fn generate_tasks(
    State(state): State<AppStateArc>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    // Every request counts against the free preview, valid or not, so the
    // gate is checked before any other handling.
    if let Err(e) = state.quota.try_acquire() {
        warn!("Generation request rejected, free limit of {} reached", e.limit);
        return Err(reject(StatusCode::FORBIDDEN, QUOTA_MESSAGE));
    }

    if req.topic.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, MISSING_TOPIC_MESSAGE));
    }

    info!(
        "Generating tasks: topic={:?} year_group={}",
        req.topic, req.year_group
    );

    let prompt = prompt::build_prompt(&req.topic, req.year_group);

    match state.llm.complete(&prompt).await {
        Ok(tasks) => Ok(Json(GenerateResponse { tasks })),
        Err(e) => {
            // Cause stays in the server log; the client gets a fixed message.
            error!("Upstream completion failed: {}", e);
            Err(reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERATION_FAILED_MESSAGE,
            ))
        }
    }
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        requests_remaining: state.quota.remaining(),
    })
}
