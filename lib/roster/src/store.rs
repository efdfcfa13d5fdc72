//! Store traits.
//!
//! One trait per table. The server holds two handles for each: a restricted
//! one used for reads and an elevated one used for authorized writes.

use async_trait::async_trait;
use league_portal_core::{PlayerId, Result, SeasonId, StaffId};

use crate::error::StoreError;
use crate::player::{Player, PlayerProfileChanges};
use crate::season::{Season, SeasonChanges};
use crate::staff::StaffMember;

/// Player profile persistence.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Lists all players ordered by display name.
    async fn list(&self) -> Result<Vec<Player>, StoreError>;

    /// Fetches a player by id.
    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, StoreError>;

    /// Inserts the player, or refreshes the row already holding the same
    /// platform account id. A refresh updates the platform username and
    /// fills in the avatar only when the profile has none.
    ///
    /// Returns the stored row, which keeps the existing id on conflict.
    async fn upsert_by_account(&self, player: &Player) -> Result<Player, StoreError>;

    /// Applies profile changes. Returns `None` when no such player exists.
    async fn update_profile(
        &self,
        id: PlayerId,
        changes: &PlayerProfileChanges,
    ) -> Result<Option<Player>, StoreError>;

    /// Sets the linked chat-platform username.
    async fn set_discord_username(
        &self,
        id: PlayerId,
        discord_username: &str,
    ) -> Result<Option<Player>, StoreError>;
}

/// Season persistence.
#[async_trait]
pub trait SeasonStore: Send + Sync {
    /// Lists seasons ordered by display order, then name.
    async fn list(&self) -> Result<Vec<Season>, StoreError>;

    /// Fetches a season by id.
    async fn find_by_id(&self, id: SeasonId) -> Result<Option<Season>, StoreError>;

    /// Fetches the season flagged current, if any.
    async fn find_current(&self) -> Result<Option<Season>, StoreError>;

    /// Inserts a new season and returns the stored row.
    async fn insert(&self, season: &Season) -> Result<Season, StoreError>;

    /// Applies changes. Returns `None` when no such season exists.
    async fn update(
        &self,
        id: SeasonId,
        changes: &SeasonChanges,
    ) -> Result<Option<Season>, StoreError>;

    /// Deletes a season. Returns whether a row was removed.
    async fn delete(&self, id: SeasonId) -> Result<bool, StoreError>;

    /// Clears the current flag on every season other than `except`.
    ///
    /// Returns the number of rows changed.
    async fn clear_current(&self, except: Option<SeasonId>) -> Result<u64, StoreError>;
}

/// Staff assignment persistence.
#[async_trait]
pub trait StaffStore: Send + Sync {
    /// Lists staff assignments, oldest first.
    async fn list(&self) -> Result<Vec<StaffMember>, StoreError>;

    /// Inserts a staff assignment and returns the stored row.
    async fn insert(&self, staff: &StaffMember) -> Result<StaffMember, StoreError>;

    /// Deletes a staff assignment. Returns whether a row was removed.
    async fn delete(&self, id: StaffId) -> Result<bool, StoreError>;
}
