use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::gate::Credential;
use crate::state::SharedState;

/// A caller presenting the granted admin credential as a bearer token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub credential: Credential,
}

impl AdminSession {
    pub fn from_headers(headers: &HeaderMap, state: &SharedState) -> Result<Self, AppError> {
        let auth_header = headers
            .get("authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;
        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        state
            .board
            .gate()
            .verify(token)
            .map(|credential| AdminSession { credential })
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}

impl FromRequestParts<SharedState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers, state)
    }
}
