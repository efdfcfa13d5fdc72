//! Player handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use league_portal_authz::Action;
use league_portal_core::PlayerId;
use league_portal_roster::{DiscordLinkRequest, Player, UpdatePlayerRequest};
use std::str::FromStr;
use std::sync::Arc;

use super::parse_id;
use crate::auth::CurrentSession;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

const NOT_FOUND: ApiError = ApiError::NotFound {
    message: "Player not found",
};

/// `GET /players`
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Player>>, ApiError> {
    let scope = state.policy.authorize(None, Action::ListPlayers, None)?;
    let players = state
        .stores(scope)
        .players
        .list()
        .await
        .map_err(|report| ApiError::store("Failed to list players", report))?;
    Ok(Json(players))
}

/// `GET /players/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let Ok(id) = PlayerId::from_str(id.trim()) else {
        return Err(NOT_FOUND);
    };
    let scope = state.policy.authorize(None, Action::ViewPlayer, Some(id))?;
    state
        .stores(scope)
        .players
        .find_by_id(id)
        .await
        .map_err(|report| ApiError::store("Failed to load player", report))?
        .map(Json)
        .ok_or(NOT_FOUND)
}

/// `PUT /players/{id}`
///
/// Profile fields, including the chat-platform username, are self-or-admin;
/// moving a player between teams is admin-only.
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdatePlayerRequest>,
) -> Result<Json<Player>, ApiError> {
    let id: PlayerId = parse_id(&id, "id", "Invalid player ID")?;
    let changes = request.validate()?;

    let scope = state
        .policy
        .authorize(session.context(), Action::UpdatePlayerProfile, Some(id))?;
    if changes.touches_team() {
        state
            .policy
            .authorize(session.context(), Action::AssignPlayerTeam, Some(id))?;
    }

    let player = state
        .stores(scope)
        .players
        .update_profile(id, &changes)
        .await
        .map_err(|report| ApiError::store("Failed to update player", report))?
        .ok_or(NOT_FOUND)?;

    tracing::info!(
        player_id = %player.id,
        discord = changes.touches_discord(),
        "player profile updated"
    );
    Ok(Json(player))
}

/// `PATCH /players/{id}/discord`
///
/// Only the owning player may link their chat-platform account here, even
/// an administrator is refused. Administrators change it through
/// `PUT /players/{id}` instead.
pub async fn link_discord(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<DiscordLinkRequest>,
) -> Result<Json<Player>, ApiError> {
    let id: PlayerId = parse_id(&id, "id", "Invalid player ID")?;
    let discord_username = request.validate()?;

    let scope = state
        .policy
        .authorize(session.context(), Action::LinkSecondaryIdentity, Some(id))?;

    let player = state
        .stores(scope)
        .players
        .set_discord_username(id, &discord_username)
        .await
        .map_err(|report| ApiError::store("Failed to link Discord account", report))?
        .ok_or(NOT_FOUND)?;

    tracing::info!(player_id = %player.id, "discord account linked");
    Ok(Json(player))
}
