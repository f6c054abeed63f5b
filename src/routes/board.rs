use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::auth::extractor::AdminSession;
use crate::board::{BoardView, SyncReport};
use crate::state::SharedState;

pub async fn view(State(state): State<SharedState>, headers: HeaderMap) -> Json<BoardView> {
    let admin = AdminSession::from_headers(&headers, &state).is_ok();
    Json(state.board.view(admin).await)
}

/// Re-pull the remote board. Failures are reported, never raised.
pub async fn pull(State(state): State<SharedState>) -> Json<SyncReport> {
    Json(state.board.reload().await)
}
