//! Authorization context derived from a session.

use league_portal_core::{PlayerId, TeamId};

/// Who is calling, as far as authorization is concerned.
///
/// This is the sole input about the caller to every authorization decision.
/// It is derived from a [`Session`](crate::Session) per request and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    subject: String,
    is_admin: bool,
    player_id: Option<PlayerId>,
    team_id: Option<TeamId>,
}

impl SessionContext {
    /// Creates a context from its parts.
    #[must_use]
    pub fn new(
        subject: String,
        is_admin: bool,
        player_id: Option<PlayerId>,
        team_id: Option<TeamId>,
    ) -> Self {
        Self {
            subject,
            is_admin,
            player_id,
            team_id,
        }
    }

    /// Context for a signed-in player without admin rights.
    #[must_use]
    pub fn player(subject: impl Into<String>, player_id: PlayerId) -> Self {
        Self::new(subject.into(), false, Some(player_id), None)
    }

    /// Context for an administrator, optionally linked to a player.
    #[must_use]
    pub fn admin(subject: impl Into<String>, player_id: Option<PlayerId>) -> Self {
        Self::new(subject.into(), true, player_id, None)
    }

    /// Returns the primary linked identity.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns true if the caller carries the administrator flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns the caller's linked player, if any.
    #[must_use]
    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id
    }

    /// Returns the caller's linked team, if any.
    #[must_use]
    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    /// Returns true if the caller is linked to the given player.
    #[must_use]
    pub fn owns_player(&self, player_id: PlayerId) -> bool {
        self.player_id == Some(player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_context_owns_only_its_player() {
        let mine = PlayerId::new();
        let context = SessionContext::player("acct_1", mine);
        assert!(context.owns_player(mine));
        assert!(!context.owns_player(PlayerId::new()));
        assert!(!context.is_admin());
    }

    #[test]
    fn unlinked_admin_owns_nothing() {
        let context = SessionContext::admin("acct_admin", None);
        assert!(context.is_admin());
        assert!(!context.owns_player(PlayerId::new()));
    }
}
