use axum::extract::State;
use axum::Json;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use docseb_core::session::{verify_pin, SessionContext};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StartSessionRequest {
    pin: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusRequest {
    started_at: Timestamp,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    started_at: Timestamp,
    expires_at: Option<Timestamp>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    valid: bool,
    expires_at: Option<Timestamp>,
}

/// Exchange the dashboard PIN for a session start time.
///
/// The client keeps `startedAt` and presents it to `/session/status`.
pub async fn start_session(
    State(state): State<AppState>,
    Json(body): Json<StartSessionRequest>,
) -> Result<Json<SessionView>, ApiError> {
    verify_pin(&body.pin, &state.config.pin)?;

    let mut session = SessionContext::new(state.config.session_duration);
    let now = Timestamp::now();
    session.start(now);
    tracing::info!(started_at = %now, "session_started");

    Ok(Json(SessionView {
        started_at: now,
        expires_at: session.expires_at(),
    }))
}

pub async fn session_status(
    State(state): State<AppState>,
    Json(body): Json<SessionStatusRequest>,
) -> Json<SessionStatus> {
    let session = SessionContext::resume(body.started_at, state.config.session_duration);
    Json(SessionStatus {
        valid: session.is_valid(Timestamp::now()),
        expires_at: session.expires_at(),
    })
}
