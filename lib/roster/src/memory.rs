//! In-memory roster store for tests and local runs.
//!
//! Mirrors the Postgres constraints the handlers rely on: unique season
//! names, a single current season, unique platform account ids and the
//! staff-to-player foreign key.

use async_trait::async_trait;
use chrono::Utc;
use league_portal_core::{PlayerId, Result, SeasonId, StaffId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::player::{Player, PlayerProfileChanges};
use crate::season::{Season, SeasonChanges};
use crate::staff::StaffMember;
use crate::store::{PlayerStore, SeasonStore, StaffStore};

#[derive(Default)]
struct State {
    players: Vec<Player>,
    seasons: Vec<Season>,
    staff: Vec<StaffMember>,
}

/// Roster store backed by process memory.
///
/// Clones share state. [`write_count`](Self::write_count) counts every
/// mutating call, including ones that end up changing no rows.
#[derive(Clone, Default)]
pub struct MemoryRosterStore {
    state: Arc<Mutex<State>>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MemoryRosterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls made so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with a query error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, entity: &'static str, operation: &'static str) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::query(entity, operation, "store unavailable").into());
        }
        Ok(())
    }

    fn write(&self, entity: &'static str, operation: &'static str) -> Result<(), StoreError> {
        self.check(entity, operation)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn sort_seasons(seasons: &mut [Season]) {
    seasons.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[async_trait]
impl PlayerStore for MemoryRosterStore {
    async fn list(&self) -> Result<Vec<Player>, StoreError> {
        self.check("player", "list")?;
        let mut players = self.state.lock().await.players.clone();
        players.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(players)
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        self.check("player", "select")?;
        let state = self.state.lock().await;
        Ok(state.players.iter().find(|p| p.id == id).cloned())
    }

    async fn upsert_by_account(&self, player: &Player) -> Result<Player, StoreError> {
        self.write("player", "upsert")?;
        let mut state = self.state.lock().await;
        if let Some(existing) = state
            .players
            .iter_mut()
            .find(|p| p.platform_account_id == player.platform_account_id)
        {
            existing.platform_username = player.platform_username.clone();
            if existing.avatar_url.is_none() {
                existing.avatar_url = player.avatar_url.clone();
            }
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }
        state.players.push(player.clone());
        Ok(player.clone())
    }

    async fn update_profile(
        &self,
        id: PlayerId,
        changes: &PlayerProfileChanges,
    ) -> Result<Option<Player>, StoreError> {
        self.write("player", "update")?;
        let mut state = self.state.lock().await;
        Ok(state.players.iter_mut().find(|p| p.id == id).map(|p| {
            p.apply(changes);
            p.clone()
        }))
    }

    async fn set_discord_username(
        &self,
        id: PlayerId,
        discord_username: &str,
    ) -> Result<Option<Player>, StoreError> {
        self.write("player", "update")?;
        let mut state = self.state.lock().await;
        Ok(state.players.iter_mut().find(|p| p.id == id).map(|p| {
            p.discord_username = Some(discord_username.to_string());
            p.updated_at = Utc::now();
            p.clone()
        }))
    }
}

#[async_trait]
impl SeasonStore for MemoryRosterStore {
    async fn list(&self) -> Result<Vec<Season>, StoreError> {
        self.check("season", "list")?;
        let mut seasons = self.state.lock().await.seasons.clone();
        sort_seasons(&mut seasons);
        Ok(seasons)
    }

    async fn find_by_id(&self, id: SeasonId) -> Result<Option<Season>, StoreError> {
        self.check("season", "select")?;
        let state = self.state.lock().await;
        Ok(state.seasons.iter().find(|s| s.id == id).cloned())
    }

    async fn find_current(&self) -> Result<Option<Season>, StoreError> {
        self.check("season", "select")?;
        let state = self.state.lock().await;
        Ok(state.seasons.iter().find(|s| s.is_current).cloned())
    }

    async fn insert(&self, season: &Season) -> Result<Season, StoreError> {
        self.write("season", "insert")?;
        let mut state = self.state.lock().await;
        if state.seasons.iter().any(|s| s.name == season.name) {
            return Err(
                StoreError::query("season", "insert", "duplicate key value on seasons_name_key")
                    .into(),
            );
        }
        if season.is_current && state.seasons.iter().any(|s| s.is_current) {
            return Err(StoreError::query(
                "season",
                "insert",
                "duplicate key value on seasons_single_current",
            )
            .into());
        }
        state.seasons.push(season.clone());
        Ok(season.clone())
    }

    async fn update(
        &self,
        id: SeasonId,
        changes: &SeasonChanges,
    ) -> Result<Option<Season>, StoreError> {
        self.write("season", "update")?;
        let mut state = self.state.lock().await;
        let name_taken = changes
            .name
            .as_ref()
            .is_some_and(|name| state.seasons.iter().any(|s| s.id != id && &s.name == name));
        if name_taken {
            return Err(
                StoreError::query("season", "update", "duplicate key value on seasons_name_key")
                    .into(),
            );
        }
        if changes.is_current == Some(true)
            && state.seasons.iter().any(|s| s.id != id && s.is_current)
        {
            return Err(StoreError::query(
                "season",
                "update",
                "duplicate key value on seasons_single_current",
            )
            .into());
        }
        Ok(state.seasons.iter_mut().find(|s| s.id == id).map(|s| {
            s.apply(changes);
            s.clone()
        }))
    }

    async fn delete(&self, id: SeasonId) -> Result<bool, StoreError> {
        self.write("season", "delete")?;
        let mut state = self.state.lock().await;
        let before = state.seasons.len();
        state.seasons.retain(|s| s.id != id);
        Ok(state.seasons.len() != before)
    }

    async fn clear_current(&self, except: Option<SeasonId>) -> Result<u64, StoreError> {
        self.write("season", "clear current")?;
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let mut cleared = 0;
        for season in state
            .seasons
            .iter_mut()
            .filter(|s| s.is_current && Some(s.id) != except)
        {
            season.is_current = false;
            season.updated_at = now;
            cleared += 1;
        }
        Ok(cleared)
    }
}

#[async_trait]
impl StaffStore for MemoryRosterStore {
    async fn list(&self) -> Result<Vec<StaffMember>, StoreError> {
        self.check("staff", "list")?;
        let mut staff = self.state.lock().await.staff.clone();
        staff.sort_by_key(|s| s.created_at);
        Ok(staff)
    }

    async fn insert(&self, staff: &StaffMember) -> Result<StaffMember, StoreError> {
        self.write("staff", "insert")?;
        let mut state = self.state.lock().await;
        if !state.players.iter().any(|p| p.id == staff.player_id) {
            return Err(StoreError::query(
                "staff",
                "insert",
                "foreign key violation on staff_player_id_fkey",
            )
            .into());
        }
        state.staff.push(staff.clone());
        Ok(staff.clone())
    }

    async fn delete(&self, id: StaffId) -> Result<bool, StoreError> {
        self.write("staff", "delete")?;
        let mut state = self.state.lock().await;
        let before = state.staff.len();
        state.staff.retain(|s| s.id != id);
        Ok(state.staff.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::NewSeason;
    use crate::staff::NewStaff;

    fn season(name: &str, order: i32) -> Season {
        Season::new(NewSeason {
            name: name.to_string(),
            display_order: order,
            is_current: false,
            start_date: None,
            end_date: None,
        })
    }

    #[tokio::test]
    async fn seasons_list_by_display_order_then_name() {
        let store = MemoryRosterStore::new();
        for (name, order) in [("B", 2), ("Z", 1), ("A", 2)] {
            SeasonStore::insert(&store, &season(name, order)).await.unwrap();
        }

        let names: Vec<_> = SeasonStore::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Z", "A", "B"]);
    }

    #[tokio::test]
    async fn duplicate_season_name_is_rejected() {
        let store = MemoryRosterStore::new();
        SeasonStore::insert(&store, &season("S1", 1)).await.unwrap();
        assert!(SeasonStore::insert(&store, &season("S1", 2)).await.is_err());
    }

    #[tokio::test]
    async fn second_current_season_is_rejected() {
        let store = MemoryRosterStore::new();
        let mut first = season("S1", 1);
        first.is_current = true;
        let mut second = season("S2", 2);
        second.is_current = true;

        SeasonStore::insert(&store, &first).await.unwrap();
        assert!(SeasonStore::insert(&store, &second).await.is_err());
    }

    #[tokio::test]
    async fn upsert_keeps_existing_profile() {
        let store = MemoryRosterStore::new();
        let first = Player::register("acct-1", "old", None);
        let stored = store.upsert_by_account(&first).await.unwrap();

        let changes = PlayerProfileChanges {
            display_name: Some("Custom".to_string()),
            ..Default::default()
        };
        store.update_profile(stored.id, &changes).await.unwrap();

        let again = Player::register("acct-1", "new", Some("a.png".to_string()));
        let refreshed = store.upsert_by_account(&again).await.unwrap();
        assert_eq!(refreshed.id, stored.id);
        assert_eq!(refreshed.platform_username, "new");
        assert_eq!(refreshed.display_name, "Custom");
        assert_eq!(PlayerStore::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn staff_requires_existing_player() {
        let store = MemoryRosterStore::new();
        let orphan = StaffMember::new(NewStaff {
            player_id: PlayerId::new(),
            role: "Referee".to_string(),
        });
        assert!(StaffStore::insert(&store, &orphan).await.is_err());

        let player = store
            .upsert_by_account(&Player::register("acct", "name", None))
            .await
            .unwrap();
        let staff = StaffMember::new(NewStaff {
            player_id: player.id,
            role: "Referee".to_string(),
        });
        StaffStore::insert(&store, &staff).await.unwrap();
        assert!(StaffStore::delete(&store, staff.id).await.unwrap());
        assert!(!StaffStore::delete(&store, staff.id).await.unwrap());
    }

    #[tokio::test]
    async fn failing_store_counts_no_writes() {
        let store = MemoryRosterStore::new();
        store.set_failing(true);
        assert!(SeasonStore::insert(&store, &season("S1", 1)).await.is_err());
        assert!(PlayerStore::list(&store).await.is_err());
        assert_eq!(store.write_count(), 0);
    }
}
