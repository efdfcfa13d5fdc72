//! Staff handlers.
//!
//! Whether writes need an administrator is configured through
//! `LEAGUE__STAFF_WRITES`; the policy applies it.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use league_portal_authz::Action;
use league_portal_core::StaffId;
use league_portal_roster::{CreateStaffRequest, StaffMember};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{Success, parse_id};
use crate::auth::CurrentSession;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

/// Body returned by `POST /staff`.
#[derive(Debug, Serialize)]
pub struct Created {
    pub success: bool,
    pub data: StaffMember,
}

/// Query string of `DELETE /staff`.
#[derive(Debug, Deserialize)]
pub struct DeleteStaffQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// `GET /staff`
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<StaffMember>>, ApiError> {
    let scope = state.policy.authorize(None, Action::ListStaff, None)?;
    let staff = state
        .stores(scope)
        .staff
        .list()
        .await
        .map_err(|report| ApiError::store("Failed to list staff", report))?;
    Ok(Json(staff))
}

/// `POST /staff`
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    ApiJson(request): ApiJson<CreateStaffRequest>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let new_staff = request.validate()?;

    let scope = state
        .policy
        .authorize(session.context(), Action::CreateStaff, None)?;
    let stores = state.stores(scope);

    let player = stores
        .players
        .find_by_id(new_staff.player_id)
        .await
        .map_err(|report| ApiError::store("Failed to create staff member", report))?;
    if player.is_none() {
        return Err(ApiError::invalid("playerId", "Player not found"));
    }

    let staff = stores
        .staff
        .insert(&StaffMember::new(new_staff))
        .await
        .map_err(|report| ApiError::store("Failed to create staff member", report))?;

    tracing::info!(staff_id = %staff.id, player_id = %staff.player_id, "staff member added");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            success: true,
            data: staff,
        }),
    ))
}

/// `DELETE /staff?id=`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    Query(query): Query<DeleteStaffQuery>,
) -> Result<Json<Success>, ApiError> {
    let Some(raw) = query.id.filter(|id| !id.trim().is_empty()) else {
        return Err(ApiError::invalid("id", "Staff ID is required"));
    };
    let id: StaffId = parse_id(&raw, "id", "Invalid staff ID")?;

    let scope = state
        .policy
        .authorize(session.context(), Action::DeleteStaff, None)?;

    let removed = state
        .stores(scope)
        .staff
        .delete(id)
        .await
        .map_err(|report| ApiError::store("Failed to delete staff member", report))?;

    tracing::info!(staff_id = %id, removed, "staff member deleted");
    Ok(Json(Success::OK))
}
