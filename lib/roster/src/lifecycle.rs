//! Season lifecycle.
//!
//! Keeps at most one season flagged current. Setting the flag first clears it
//! on every other season, then writes the target row. The two steps are not
//! atomic: a failure between them leaves no season current, which the next
//! admin write corrects. Concurrent writers can interleave; the partial unique
//! index on `seasons(is_current)` turns the worst case into a failed write.

use league_portal_core::{Result, SeasonId};

use crate::error::StoreError;
use crate::season::{NewSeason, Season, SeasonChanges};
use crate::store::SeasonStore;

/// Applies season writes while maintaining the single-current-season rule.
pub struct SeasonLifecycle<'a> {
    seasons: &'a dyn SeasonStore,
}

impl<'a> SeasonLifecycle<'a> {
    #[must_use]
    pub fn new(seasons: &'a dyn SeasonStore) -> Self {
        Self { seasons }
    }

    /// Inserts a new season. A season created current clears the flag on
    /// all existing seasons first.
    ///
    /// # Errors
    ///
    /// Returns the store error from either step.
    pub async fn create(&self, new_season: NewSeason) -> Result<Season, StoreError> {
        let season = Season::new(new_season);
        if season.is_current {
            let cleared = self.seasons.clear_current(None).await?;
            tracing::debug!(cleared, season_id = %season.id, "cleared current flag before create");
        }
        let stored = self.seasons.insert(&season).await?;
        tracing::info!(season_id = %stored.id, is_current = stored.is_current, "season created");
        Ok(stored)
    }

    /// Applies changes to a season. Returns `None` if the season does not
    /// exist; a clear step already issued is not undone in that case.
    ///
    /// # Errors
    ///
    /// Returns the store error from either step.
    pub async fn update(
        &self,
        id: SeasonId,
        changes: &SeasonChanges,
    ) -> Result<Option<Season>, StoreError> {
        if changes.is_current == Some(true) {
            let cleared = self.seasons.clear_current(Some(id)).await?;
            tracing::debug!(cleared, season_id = %id, "cleared current flag before update");
        }
        let updated = self.seasons.update(id, changes).await?;
        if let Some(season) = &updated {
            tracing::info!(season_id = %season.id, is_current = season.is_current, "season updated");
        }
        Ok(updated)
    }

    /// Flips the current flag on one season, leaving its other fields alone.
    ///
    /// Clearing the flag touches only the target row.
    ///
    /// # Errors
    ///
    /// Returns the store error from either step.
    pub async fn set_current_season(
        &self,
        target: SeasonId,
        make_current: bool,
    ) -> Result<Option<Season>, StoreError> {
        self.update(target, &SeasonChanges::current_flag(make_current))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRosterStore;

    fn new_season(name: &str, order: i32, is_current: bool) -> NewSeason {
        NewSeason {
            name: name.to_string(),
            display_order: order,
            is_current,
            start_date: None,
            end_date: None,
        }
    }

    async fn current_ids(store: &MemoryRosterStore) -> Vec<SeasonId> {
        SeasonStore::list(store)
            .await
            .unwrap()
            .into_iter()
            .filter(|s| s.is_current)
            .map(|s| s.id)
            .collect()
    }

    #[tokio::test]
    async fn creating_current_season_clears_others() {
        let store = MemoryRosterStore::new();
        let lifecycle = SeasonLifecycle::new(&store);

        let first = lifecycle.create(new_season("S1", 1, true)).await.unwrap();
        let second = lifecycle.create(new_season("S2", 2, true)).await.unwrap();

        assert!(second.is_current);
        assert_eq!(current_ids(&store).await, vec![second.id]);
        let first = SeasonStore::find_by_id(&store, first.id).await.unwrap().unwrap();
        assert!(!first.is_current);
    }

    #[tokio::test]
    async fn non_current_create_touches_nothing_else() {
        let store = MemoryRosterStore::new();
        let lifecycle = SeasonLifecycle::new(&store);

        let first = lifecycle.create(new_season("S1", 1, true)).await.unwrap();
        let writes = store.write_count();
        lifecycle.create(new_season("S2", 2, false)).await.unwrap();

        assert_eq!(store.write_count(), writes + 1);
        assert_eq!(current_ids(&store).await, vec![first.id]);
    }

    #[tokio::test]
    async fn most_recently_set_season_is_current() {
        let store = MemoryRosterStore::new();
        let lifecycle = SeasonLifecycle::new(&store);

        let mut ids = Vec::new();
        for (i, name) in ["S1", "S2", "S3"].into_iter().enumerate() {
            let season = lifecycle
                .create(new_season(name, i as i32, false))
                .await
                .unwrap();
            ids.push(season.id);
        }

        for &target in [ids[1], ids[0], ids[2], ids[2], ids[1]].iter() {
            lifecycle.set_current_season(target, true).await.unwrap();
            assert_eq!(current_ids(&store).await, vec![target]);
        }

        lifecycle.set_current_season(ids[0], false).await.unwrap();
        assert_eq!(current_ids(&store).await, vec![ids[1]]);

        lifecycle.set_current_season(ids[1], false).await.unwrap();
        assert!(current_ids(&store).await.is_empty());
    }

    #[tokio::test]
    async fn set_current_keeps_dates() {
        let store = MemoryRosterStore::new();
        let lifecycle = SeasonLifecycle::new(&store);
        let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();

        let season = lifecycle
            .create(NewSeason {
                start_date: Some(start),
                ..new_season("S1", 1, false)
            })
            .await
            .unwrap();
        let updated = lifecycle
            .set_current_season(season.id, true)
            .await
            .unwrap()
            .unwrap();

        assert!(updated.is_current);
        assert_eq!(updated.start_date, Some(start));
    }

    #[tokio::test]
    async fn missing_target_returns_none_after_clearing() {
        let store = MemoryRosterStore::new();
        let lifecycle = SeasonLifecycle::new(&store);

        lifecycle.create(new_season("S1", 1, true)).await.unwrap();
        let result = lifecycle
            .set_current_season(SeasonId::new(), true)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(current_ids(&store).await.is_empty());
    }

    #[tokio::test]
    async fn store_failure_surfaces() {
        let store = MemoryRosterStore::new();
        store.set_failing(true);
        let lifecycle = SeasonLifecycle::new(&store);

        assert!(lifecycle.create(new_season("S1", 1, true)).await.is_err());
    }
}
