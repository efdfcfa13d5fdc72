//! Season repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use league_portal_core::{Result, SeasonId};
use league_portal_roster::{Season, SeasonChanges, SeasonStore, StoreError};
use sqlx::{FromRow, PgPool};

use super::decode_id;

const COLUMNS: &str =
    "id, name, display_order, is_current, start_date, end_date, created_at, updated_at";

/// Row type for season queries.
#[derive(FromRow)]
struct SeasonRow {
    id: String,
    name: String,
    display_order: i32,
    is_current: bool,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SeasonRow {
    fn try_into_season(self) -> Result<Season, StoreError> {
        Ok(Season {
            id: decode_id("season", &self.id)?,
            name: self.name,
            display_order: self.display_order,
            is_current: self.is_current,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for seasons.
pub struct SeasonRepository {
    pool: PgPool,
}

impl SeasonRepository {
    /// Creates a new season repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeasonStore for SeasonRepository {
    async fn list(&self) -> Result<Vec<Season>, StoreError> {
        let rows: Vec<SeasonRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM seasons ORDER BY display_order, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("season", "list", e))?;

        rows.into_iter().map(SeasonRow::try_into_season).collect()
    }

    async fn find_by_id(&self, id: SeasonId) -> Result<Option<Season>, StoreError> {
        let row: Option<SeasonRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM seasons WHERE id = $1"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::query("season", "select", e))?;

        match row {
            Some(r) => Ok(Some(r.try_into_season()?)),
            None => Ok(None),
        }
    }

    async fn find_current(&self) -> Result<Option<Season>, StoreError> {
        let row: Option<SeasonRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM seasons WHERE is_current LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::query("season", "select", e))?;

        match row {
            Some(r) => Ok(Some(r.try_into_season()?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, season: &Season) -> Result<Season, StoreError> {
        let row: SeasonRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO seasons (id, name, display_order, is_current, start_date, end_date,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(season.id.to_string())
        .bind(&season.name)
        .bind(season.display_order)
        .bind(season.is_current)
        .bind(season.start_date)
        .bind(season.end_date)
        .bind(season.created_at)
        .bind(season.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::query("season", "insert", e))?;

        row.try_into_season()
    }

    async fn update(
        &self,
        id: SeasonId,
        changes: &SeasonChanges,
    ) -> Result<Option<Season>, StoreError> {
        let row: Option<SeasonRow> = sqlx::query_as(&format!(
            r#"
            UPDATE seasons
            SET name = COALESCE($2, name),
                display_order = COALESCE($3, display_order),
                is_current = COALESCE($4, is_current),
                start_date = CASE WHEN $5 THEN $6 ELSE start_date END,
                end_date = CASE WHEN $7 THEN $8 ELSE end_date END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(&changes.name)
        .bind(changes.display_order)
        .bind(changes.is_current)
        .bind(changes.start_date.is_some())
        .bind(changes.start_date.flatten())
        .bind(changes.end_date.is_some())
        .bind(changes.end_date.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::query("season", "update", e))?;

        match row {
            Some(r) => Ok(Some(r.try_into_season()?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: SeasonId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM seasons WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::query("season", "delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_current(&self, except: Option<SeasonId>) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE seasons
            SET is_current = FALSE, updated_at = NOW()
            WHERE is_current AND ($1::TEXT IS NULL OR id <> $1)
            "#,
        )
        .bind(except.map(|id| id.to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::query("season", "clear current", e))?;

        Ok(result.rows_affected())
    }
}
