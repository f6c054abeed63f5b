pub mod board;
pub mod files;
pub mod projects;
pub mod session;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Board
        .route("/api/board", get(board::view))
        .route("/api/sync/pull", post(board::pull))
        // Projects
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/api/projects/{id}/move", post(projects::move_project))
        // Session
        .route(
            "/api/session",
            get(session::status)
                .post(session::login)
                .delete(session::logout),
        )
        // Files
        .route("/api/files", get(files::list))
        .route("/api/files/{id}", get(files::read))
}
