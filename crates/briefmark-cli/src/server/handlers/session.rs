//! Session navigation and scoring handlers.

use axum::{extract::State, Json};
use briefmark::{Mark, ReviewSession, SessionView};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for scoring the current record.
#[derive(Deserialize)]
pub struct MarkRequest {
    pub mark: i64,
}

/// Response after a forced save.
#[derive(Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub path: String,
}

/// Apply `change` to the loaded session and return the new view.
///
/// `change` reports whether the session changed; only then is it autosaved,
/// before the write lock is released.
async fn mutate(
    state: &AppState,
    change: impl FnOnce(&mut ReviewSession) -> Result<bool, ApiError>,
) -> Result<SessionView, ApiError> {
    let mut slot = state.slot.write().await;
    let session = slot.get_mut().ok_or_else(ApiError::no_session)?;

    let changed = change(session)?;
    if changed {
        state.autosave(session)?;
    }

    Ok(session.view()?)
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let slot = state.slot.read().await;
    let session = slot.get().ok_or_else(ApiError::no_session)?;
    Ok(Json(session.view()?))
}

/// POST /api/previous
pub async fn go_previous(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let view = mutate(&state, |session| Ok(session.go_previous())).await?;
    Ok(Json(view))
}

/// POST /api/next
pub async fn go_next(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let view = mutate(&state, |session| Ok(session.go_next())).await?;
    Ok(Json(view))
}

/// POST /api/mark
pub async fn set_mark(
    State(state): State<AppState>,
    Json(req): Json<MarkRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let mark = Mark::try_from(req.mark)?;

    let view = mutate(&state, |session| {
        session.set_label(mark)?;
        Ok(true)
    })
    .await?;

    Ok(Json(view))
}

/// POST /api/save - Force save the session snapshot.
pub async fn save_session(State(state): State<AppState>) -> Result<Json<SaveResponse>, ApiError> {
    let path = state.save().await?.ok_or_else(ApiError::no_session)?;
    Ok(Json(SaveResponse {
        success: true,
        path: path.display().to_string(),
    }))
}
