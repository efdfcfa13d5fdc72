//! Legacy shared-password admin gate.
//!
//! Deprecated. A successful login issues no session and grants nothing on
//! its own; session-based administrators are unaffected by it.

use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::Success;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

/// Body of `POST /admin/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// `POST /admin/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<Success>, ApiError> {
    tracing::warn!("deprecated legacy admin login used");

    let candidate = request.password.unwrap_or_default();
    if !state.admin_password_matches(&candidate) {
        return Err(ApiError::InvalidPassword);
    }
    Ok(Json(Success::OK))
}
