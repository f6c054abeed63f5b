use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::extractor::AdminSession;
use crate::board::Mutation;
use crate::error::AppError;
use crate::models::Project;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ProjectForm {
    pub title: String,
    pub link: Option<String>,
    pub desc: Option<String>,
}

#[derive(Deserialize)]
pub struct MoveProject {
    pub section: String,
}

pub async fn list(State(state): State<SharedState>) -> Json<Vec<Project>> {
    Json(state.board.projects().await)
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .board
        .find(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

pub async fn create(
    admin: AdminSession,
    State(state): State<SharedState>,
    Json(req): Json<ProjectForm>,
) -> Result<Json<Mutation>, AppError> {
    let mutation = state
        .board
        .create(
            &admin.credential,
            &req.title,
            req.link.as_deref(),
            req.desc.as_deref(),
        )
        .await?;
    Ok(Json(mutation))
}

pub async fn update(
    admin: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<ProjectForm>,
) -> Result<Json<Mutation>, AppError> {
    let mutation = state
        .board
        .update(
            &admin.credential,
            &id,
            &req.title,
            req.link.as_deref(),
            req.desc.as_deref(),
        )
        .await?;
    Ok(Json(mutation))
}

pub async fn delete(
    admin: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Mutation>, AppError> {
    Ok(Json(state.board.delete(&admin.credential, &id).await?))
}

pub async fn move_project(
    admin: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<MoveProject>,
) -> Result<Json<Mutation>, AppError> {
    let mutation = state
        .board
        .move_project(&admin.credential, &id, &req.section)
        .await?;
    Ok(Json(mutation))
}
