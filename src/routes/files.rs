use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::auth::extractor::AdminSession;
use crate::bridge::FileBridge;
use crate::error::AppError;
use crate::gate::Credential;
use crate::models::FileEntry;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct FileContent {
    pub id: String,
    pub content: String,
}

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Vec<FileEntry>>, AppError> {
    let bridge = bridge(&state)?;
    let credential = caller_credential(&headers, &state);
    Ok(Json(bridge.list(credential.as_ref()).await?))
}

pub async fn read(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<FileContent>, AppError> {
    let bridge = bridge(&state)?;
    let credential = caller_credential(&headers, &state);
    let content = bridge.read(&id, credential.as_ref()).await?;
    Ok(Json(FileContent { id, content }))
}

fn bridge(state: &SharedState) -> Result<&FileBridge, AppError> {
    state
        .files
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("File bridge is not configured".to_string()))
}

/// Admin callers forward their credential to the bridge; everyone else calls anonymously.
fn caller_credential(headers: &HeaderMap, state: &SharedState) -> Option<Credential> {
    AdminSession::from_headers(headers, state)
        .ok()
        .map(|admin| admin.credential)
}
