//! Player repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use league_portal_core::{PlayerId, Result, TeamId};
use league_portal_roster::{Player, PlayerProfileChanges, PlayerStore, StoreError};
use sqlx::{FromRow, PgPool};

use super::decode_id;

const COLUMNS: &str = "id, platform_account_id, platform_username, discord_username, \
     display_name, description, avatar_url, team_id, is_admin, created_at, updated_at";

/// Row type for player queries.
#[derive(FromRow)]
struct PlayerRow {
    id: String,
    platform_account_id: String,
    platform_username: String,
    discord_username: Option<String>,
    display_name: String,
    description: Option<String>,
    avatar_url: Option<String>,
    team_id: Option<String>,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlayerRow {
    fn try_into_player(self) -> Result<Player, StoreError> {
        let team_id = match self.team_id.as_deref() {
            Some(raw) => Some(decode_id::<TeamId>("player", raw)?),
            None => None,
        };
        Ok(Player {
            id: decode_id("player", &self.id)?,
            platform_account_id: self.platform_account_id,
            platform_username: self.platform_username,
            discord_username: self.discord_username,
            display_name: self.display_name,
            description: self.description,
            avatar_url: self.avatar_url,
            team_id,
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_players(rows: Vec<PlayerRow>) -> Result<Vec<Player>, StoreError> {
    rows.into_iter().map(PlayerRow::try_into_player).collect()
}

/// Repository for player profiles.
pub struct PlayerRepository {
    pool: PgPool,
}

impl PlayerRepository {
    /// Creates a new player repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PlayerRepository {
    async fn list(&self) -> Result<Vec<Player>, StoreError> {
        let rows: Vec<PlayerRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM players ORDER BY display_name, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("player", "list", e))?;

        into_players(rows)
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        let row: Option<PlayerRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM players WHERE id = $1"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::query("player", "select", e))?;

        match row {
            Some(r) => Ok(Some(r.try_into_player()?)),
            None => Ok(None),
        }
    }

    async fn upsert_by_account(&self, player: &Player) -> Result<Player, StoreError> {
        let row: PlayerRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO players (id, platform_account_id, platform_username, display_name,
                                 avatar_url, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (platform_account_id) DO UPDATE
            SET platform_username = EXCLUDED.platform_username,
                avatar_url = COALESCE(players.avatar_url, EXCLUDED.avatar_url),
                updated_at = EXCLUDED.updated_at
            RETURNING {COLUMNS}
            "#
        ))
        .bind(player.id.to_string())
        .bind(&player.platform_account_id)
        .bind(&player.platform_username)
        .bind(&player.display_name)
        .bind(&player.avatar_url)
        .bind(player.is_admin)
        .bind(player.created_at)
        .bind(player.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::query("player", "upsert", e))?;

        row.try_into_player()
    }

    async fn update_profile(
        &self,
        id: PlayerId,
        changes: &PlayerProfileChanges,
    ) -> Result<Option<Player>, StoreError> {
        let row: Option<PlayerRow> = sqlx::query_as(&format!(
            r#"
            UPDATE players
            SET display_name = COALESCE($2, display_name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                avatar_url = CASE WHEN $5 THEN $6 ELSE avatar_url END,
                team_id = CASE WHEN $7 THEN $8 ELSE team_id END,
                discord_username = CASE WHEN $9 THEN $10 ELSE discord_username END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(&changes.display_name)
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .bind(changes.avatar_url.is_some())
        .bind(changes.avatar_url.clone().flatten())
        .bind(changes.team_id.is_some())
        .bind(changes.team_id.flatten().map(|team| team.to_string()))
        .bind(changes.discord_username.is_some())
        .bind(changes.discord_username.clone().flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::query("player", "update", e))?;

        match row {
            Some(r) => Ok(Some(r.try_into_player()?)),
            None => Ok(None),
        }
    }

    async fn set_discord_username(
        &self,
        id: PlayerId,
        discord_username: &str,
    ) -> Result<Option<Player>, StoreError> {
        let row: Option<PlayerRow> = sqlx::query_as(&format!(
            r#"
            UPDATE players
            SET discord_username = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(discord_username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::query("player", "update", e))?;

        match row {
            Some(r) => Ok(Some(r.try_into_player()?)),
            None => Ok(None),
        }
    }
}
