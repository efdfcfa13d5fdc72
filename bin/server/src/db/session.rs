//! Session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use league_portal_core::{PlayerId, Result, TeamId};
use league_portal_platform_access::{
    AuthenticationError, RoleSet, Session, SessionId, SessionStore,
};
use sqlx::{FromRow, PgPool, types::Json};
use std::str::FromStr;

/// Row type for session queries.
#[derive(FromRow)]
struct SessionRow {
    id: String,
    subject: String,
    roles: Json<RoleSet>,
    player_id: Option<String>,
    team_id: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

fn invalid_row(column: &str, raw: &str, reason: impl std::fmt::Display) -> AuthenticationError {
    AuthenticationError::StoreFailed {
        reason: format!("invalid {column} '{raw}': {reason}"),
    }
}

impl SessionRow {
    fn try_into_session(self) -> Result<Session, AuthenticationError> {
        let player_id = match self.player_id.as_deref() {
            Some(raw) => {
                Some(PlayerId::from_str(raw).map_err(|e| invalid_row("player id", raw, e))?)
            }
            None => None,
        };
        let team_id = match self.team_id.as_deref() {
            Some(raw) => Some(TeamId::from_str(raw).map_err(|e| invalid_row("team id", raw, e))?),
            None => None,
        };

        Ok(Session::with_all_fields(
            SessionId::new(self.id),
            self.subject,
            self.roles.0,
            player_id,
            team_id,
            self.created_at,
            self.expires_at,
        ))
    }
}

fn store_failed(e: sqlx::Error) -> AuthenticationError {
    AuthenticationError::StoreFailed {
        reason: e.to_string(),
    }
}

/// Repository for session operations.
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, AuthenticationError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, subject, roles, player_id, team_id, created_at, expires_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_failed)?;

        match row {
            Some(r) => Ok(Some(r.try_into_session()?)),
            None => Ok(None),
        }
    }

    async fn create(&self, session: &Session) -> Result<(), AuthenticationError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, subject, roles, player_id, team_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id().as_str())
        .bind(session.subject())
        .bind(Json(session.roles()))
        .bind(session.player_id().map(|id| id.to_string()))
        .bind(session.team_id().map(|id| id.to_string()))
        .bind(session.created_at())
        .bind(session.expires_at())
        .execute(&self.pool)
        .await
        .map_err(store_failed)?;

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), AuthenticationError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(store_failed)?;

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, AuthenticationError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await
            .map_err(store_failed)?;

        Ok(result.rows_affected())
    }
}
