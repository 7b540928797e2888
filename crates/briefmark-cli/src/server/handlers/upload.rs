//! Records upload handler.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use briefmark::{input, LoadOutcome, SessionView};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query parameters for an upload.
#[derive(Deserialize)]
pub struct UploadParams {
    /// Original file name, used to name the export.
    pub name: String,
}

/// Response after loading an upload.
#[derive(Serialize)]
pub struct UploadResponse {
    pub outcome: LoadOutcome,
    pub view: SessionView,
}

/// POST /api/upload?name=<file>
pub async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    if !params.name.to_lowercase().ends_with(".json") {
        return Err(ApiError::BadRequest(format!(
            "Only .json files are accepted, got '{}'",
            params.name
        )));
    }

    let (records, source) = input::parse_bytes(&params.name, &body).map_err(|e| {
        ApiError::BadRequest(format!("Please upload a valid JSON file. {}", e))
    })?;

    let mut slot = state.slot.write().await;
    let outcome = slot.load(records, source);
    let session = slot.get().ok_or_else(ApiError::no_session)?;

    if outcome != LoadOutcome::Kept {
        state.autosave(session)?;
    }

    Ok(Json(UploadResponse {
        outcome,
        view: session.view()?,
    }))
}
