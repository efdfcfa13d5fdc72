//! Season handlers.
//!
//! Writes go through [`SeasonLifecycle`] so that at most one season stays
//! flagged current.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use league_portal_authz::Action;
use league_portal_core::SeasonId;
use league_portal_roster::{CreateSeasonRequest, Season, SeasonLifecycle, UpdateSeasonRequest};
use std::sync::Arc;

use super::{Success, parse_id};
use crate::auth::CurrentSession;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

const NOT_FOUND: ApiError = ApiError::NotFound {
    message: "Season not found",
};

/// `GET /seasons`
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Season>>, ApiError> {
    let scope = state.policy.authorize(None, Action::ListSeasons, None)?;
    let seasons = state
        .stores(scope)
        .seasons
        .list()
        .await
        .map_err(|report| ApiError::store("Failed to list seasons", report))?;
    Ok(Json(seasons))
}

/// `GET /seasons/current`
pub async fn current(State(state): State<Arc<AppState>>) -> Result<Json<Season>, ApiError> {
    let scope = state.policy.authorize(None, Action::ViewSeason, None)?;
    state
        .stores(scope)
        .seasons
        .find_current()
        .await
        .map_err(|report| ApiError::store("Failed to load current season", report))?
        .map(Json)
        .ok_or(ApiError::NotFound {
            message: "No current season",
        })
}

/// `POST /seasons`
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    ApiJson(request): ApiJson<CreateSeasonRequest>,
) -> Result<(StatusCode, Json<Season>), ApiError> {
    let new_season = request.validate()?;

    let scope = state
        .policy
        .authorize(session.context(), Action::CreateSeason, None)?;

    let season = SeasonLifecycle::new(state.stores(scope).seasons.as_ref())
        .create(new_season)
        .await
        .map_err(|report| ApiError::store("Failed to create season", report))?;

    Ok((StatusCode::CREATED, Json(season)))
}

/// `PATCH /seasons/{id}`
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateSeasonRequest>,
) -> Result<Json<Season>, ApiError> {
    let id: SeasonId = parse_id(&id, "id", "Invalid season ID")?;
    let changes = request.validate()?;

    let scope = state
        .policy
        .authorize(session.context(), Action::UpdateSeason, None)?;

    SeasonLifecycle::new(state.stores(scope).seasons.as_ref())
        .update(id, &changes)
        .await
        .map_err(|report| ApiError::store("Failed to update season", report))?
        .map(Json)
        .ok_or(NOT_FOUND)
}

/// `DELETE /seasons/{id}`
///
/// Succeeds whether or not the season still exists.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<Success>, ApiError> {
    let id: SeasonId = parse_id(&id, "id", "Invalid season ID")?;

    let scope = state
        .policy
        .authorize(session.context(), Action::DeleteSeason, None)?;

    let removed = state
        .stores(scope)
        .seasons
        .delete(id)
        .await
        .map_err(|report| ApiError::store("Failed to delete season", report))?;

    tracing::info!(season_id = %id, removed, "season deleted");
    Ok(Json(Success::OK))
}
