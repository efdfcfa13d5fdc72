//! Staff repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use league_portal_core::{Result, StaffId};
use league_portal_roster::{StaffMember, StaffStore, StoreError};
use sqlx::{FromRow, PgPool};

use super::decode_id;

/// Row type for staff queries.
#[derive(FromRow)]
struct StaffRow {
    id: String,
    player_id: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl StaffRow {
    fn try_into_staff(self) -> Result<StaffMember, StoreError> {
        Ok(StaffMember {
            id: decode_id("staff", &self.id)?,
            player_id: decode_id("staff", &self.player_id)?,
            role: self.role,
            created_at: self.created_at,
        })
    }
}

/// Repository for staff assignments.
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    /// Creates a new staff repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffStore for StaffRepository {
    async fn list(&self) -> Result<Vec<StaffMember>, StoreError> {
        let rows: Vec<StaffRow> = sqlx::query_as(
            r#"
            SELECT id, player_id, role, created_at
            FROM staff
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("staff", "list", e))?;

        rows.into_iter().map(StaffRow::try_into_staff).collect()
    }

    async fn insert(&self, staff: &StaffMember) -> Result<StaffMember, StoreError> {
        let row: StaffRow = sqlx::query_as(
            r#"
            INSERT INTO staff (id, player_id, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, player_id, role, created_at
            "#,
        )
        .bind(staff.id.to_string())
        .bind(staff.player_id.to_string())
        .bind(&staff.role)
        .bind(staff.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::query("staff", "insert", e))?;

        row.try_into_staff()
    }

    async fn delete(&self, id: StaffId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::query("staff", "delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}
