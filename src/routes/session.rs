use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AdminSession;
use crate::gate::AuthOutcome;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub admin: bool,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub outcome: AuthOutcome,
    pub admin: bool,
    /// Bearer token for mutating calls; present only when granted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Whether the caller's bearer token unlocks admin mode.
pub async fn status(State(state): State<SharedState>, headers: HeaderMap) -> Json<SessionResponse> {
    Json(SessionResponse {
        admin: AdminSession::from_headers(&headers, &state).is_ok(),
    })
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    match state.board.authenticate(&req.password) {
        AuthOutcome::Granted => (
            StatusCode::OK,
            Json(LoginResponse {
                outcome: AuthOutcome::Granted,
                admin: true,
                token: state
                    .board
                    .gate()
                    .credential()
                    .map(|c| c.as_str().to_string()),
            }),
        ),
        AuthOutcome::Denied => (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                outcome: AuthOutcome::Denied,
                admin: false,
                token: None,
            }),
        ),
    }
}

pub async fn logout(_admin: AdminSession, State(state): State<SharedState>) -> Json<SessionResponse> {
    state.board.teardown();
    Json(SessionResponse { admin: false })
}
