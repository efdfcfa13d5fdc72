//! League summary.

use axum::{Json, extract::State};
use league_portal_authz::Action;
use league_portal_roster::Season;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /league`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    pub name: String,
    pub current_season: Option<Season>,
}

/// `GET /league`
pub async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<LeagueSummary>, ApiError> {
    let scope = state.policy.authorize(None, Action::ViewSeason, None)?;
    let current_season = state
        .stores(scope)
        .seasons
        .find_current()
        .await
        .map_err(|report| ApiError::store("Failed to load current season", report))?;

    Ok(Json(LeagueSummary {
        name: state.league.name.clone(),
        current_season,
    }))
}
