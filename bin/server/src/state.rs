//! Shared application state.

use league_portal_authz::{AccessScope, Policy};
use league_portal_platform_access::SessionStore;
use league_portal_roster::{PlayerStore, SeasonStore, StaffStore};
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::LeagueConfig;
use crate::db::{PlayerRepository, SeasonRepository, StaffRepository};

/// One handle per table, all bound to the same connection.
#[derive(Clone)]
pub struct RosterStores {
    pub players: Arc<dyn PlayerStore>,
    pub seasons: Arc<dyn SeasonStore>,
    pub staff: Arc<dyn StaffStore>,
}

impl RosterStores {
    /// Repositories over a Postgres pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            players: Arc::new(PlayerRepository::new(pool.clone())),
            seasons: Arc::new(SeasonRepository::new(pool.clone())),
            staff: Arc::new(StaffRepository::new(pool)),
        }
    }

    /// Uses a single store for every table.
    pub fn shared<T>(store: T) -> Self
    where
        T: PlayerStore + SeasonStore + StaffStore + Clone + 'static,
    {
        Self {
            players: Arc::new(store.clone()),
            seasons: Arc::new(store.clone()),
            staff: Arc::new(store),
        }
    }
}

/// Shared application state.
///
/// Holds two capability handles onto the data store. Handlers never pick
/// one themselves: they ask [`AppState::stores`] for the scope the
/// authorization policy granted.
pub struct AppState {
    restricted: RosterStores,
    elevated: RosterStores,
    /// Session lookup.
    pub sessions: Arc<dyn SessionStore>,
    /// Authorization policy.
    pub policy: Policy,
    /// League display constants.
    pub league: LeagueConfig,
    admin_password: Option<String>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        restricted: RosterStores,
        elevated: RosterStores,
        sessions: Arc<dyn SessionStore>,
        league: LeagueConfig,
        admin_password: Option<String>,
    ) -> Self {
        Self {
            restricted,
            elevated,
            sessions,
            policy: Policy::new(league.staff_writes),
            league,
            admin_password,
        }
    }

    /// Returns the store handles for a granted scope.
    pub fn stores(&self, scope: AccessScope) -> &RosterStores {
        tracing::trace!(%scope, "store handles selected");
        match scope {
            AccessScope::Restricted => &self.restricted,
            AccessScope::Elevated => &self.elevated,
        }
    }

    /// Checks a candidate against the legacy admin password.
    ///
    /// Always false when no password is configured. The comparison visits
    /// every byte of the longer input.
    pub fn admin_password_matches(&self, candidate: &str) -> bool {
        self.admin_password
            .as_deref()
            .is_some_and(|password| !password.is_empty() && constant_time_eq(password, candidate))
    }
}

fn constant_time_eq(expected: &str, candidate: &str) -> bool {
    let (expected, candidate) = (expected.as_bytes(), candidate.as_bytes());
    let len = expected.len().max(candidate.len());
    let diff = (0..len).fold(expected.len() ^ candidate.len(), |acc, i| {
        let a = expected.get(i).copied().unwrap_or(0);
        let b = candidate.get(i).copied().unwrap_or(0);
        acc | usize::from(a ^ b)
    });
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_portal_authz::StaffWritePolicy;
    use league_portal_platform_access::MemorySessionStore;
    use league_portal_roster::MemoryRosterStore;

    fn state(admin_password: Option<&str>) -> AppState {
        let roster = MemoryRosterStore::new();
        AppState::new(
            RosterStores::shared(roster.clone()),
            RosterStores::shared(roster),
            Arc::new(MemorySessionStore::new()),
            LeagueConfig {
                name: "Test League".to_string(),
                staff_writes: StaffWritePolicy::Admin,
            },
            admin_password.map(str::to_string),
        )
    }

    #[test]
    fn constant_time_eq_compares_whole_input() {
        assert!(constant_time_eq("letmein", "letmein"));
        assert!(!constant_time_eq("letmein", "letmeio"));
        assert!(!constant_time_eq("letmein", "letme"));
        assert!(!constant_time_eq("letme", "letmein"));
        assert!(!constant_time_eq("letmein", "letmein\0"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn admin_password_needs_a_configured_value() {
        assert!(state(Some("letmein")).admin_password_matches("letmein"));
        assert!(!state(Some("letmein")).admin_password_matches("LETMEIN"));
        assert!(!state(Some("")).admin_password_matches(""));
        assert!(!state(None).admin_password_matches(""));
    }
}
