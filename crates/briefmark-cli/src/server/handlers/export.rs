//! Export and download handlers.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use briefmark::persistence::{export_file_name, to_export_bytes};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response after writing the export file.
#[derive(Serialize)]
pub struct ExportResponse {
    pub file_name: String,
    pub path: String,
    pub download_url: String,
}

/// POST /api/export
///
/// Holds the write lock so exports never overlap each other or a save.
pub async fn export(State(state): State<AppState>) -> Result<Json<ExportResponse>, ApiError> {
    let slot = state.slot.write().await;
    let session = slot.get().ok_or_else(ApiError::no_session)?;

    let path = session.save_export(&state.config.output_dir)?;

    Ok(Json(ExportResponse {
        file_name: export_file_name(&session.source().file),
        path: path.display().to_string(),
        download_url: "/api/download".to_string(),
    }))
}

/// GET /api/download
pub async fn download(State(state): State<AppState>) -> Result<Response, ApiError> {
    let slot = state.slot.read().await;
    let session = slot.get().ok_or_else(ApiError::no_session)?;

    let bytes = to_export_bytes(session)?;
    let file_name = export_file_name(&session.source().file);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::new();
    for byte in file_name.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}
