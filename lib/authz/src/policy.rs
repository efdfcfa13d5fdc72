//! The ordered decision list.
//!
//! Rules, first match wins:
//! 1. Reads of players, seasons and staff are public.
//! 2. Self-editable player fields require the session to be linked to the
//!    target player. Profile edits also accept an administrator.
//! 3. Admin-only actions require the administrator flag.
//! 4. Rules 2 and 3 answer `Unauthorized` when there is no session at all.
//!
//! Staff writes follow rule 3 unless [`StaffWritePolicy::Open`] is configured.

use league_portal_core::PlayerId;
use league_portal_platform_access::SessionContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthzError;
use crate::types::{AccessScope, Action};

/// Who may create and delete staff assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffWritePolicy {
    /// Administrators only.
    #[default]
    Admin,
    /// Anyone, with or without a session.
    Open,
}

/// Outcome of evaluating the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed, using the given store scope.
    Allow(AccessScope),
    /// No session where one is required.
    Unauthorized,
    /// Session present but lacking ownership or role.
    Forbidden,
}

impl Decision {
    /// Returns true if the action may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Converts the decision into the scope to use or an error.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` or `Forbidden` for denials.
    pub fn into_result(self, action: Action) -> Result<AccessScope, AuthzError> {
        match self {
            Self::Allow(scope) => Ok(scope),
            Self::Unauthorized => Err(AuthzError::NotAuthenticated { action }),
            Self::Forbidden => Err(AuthzError::Forbidden { action }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Public,
    Open,
    SelfEdit { admin_override: bool },
    AdminOnly,
}

/// The authorization policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    staff_writes: StaffWritePolicy,
}

impl Policy {
    /// Creates a policy with the given staff write rule.
    #[must_use]
    pub fn new(staff_writes: StaffWritePolicy) -> Self {
        Self { staff_writes }
    }

    /// Returns the configured staff write rule.
    #[must_use]
    pub fn staff_writes(&self) -> StaffWritePolicy {
        self.staff_writes
    }

    fn tier(&self, action: Action) -> Tier {
        match action {
            Action::ListPlayers
            | Action::ViewPlayer
            | Action::ListSeasons
            | Action::ViewSeason
            | Action::ListStaff => Tier::Public,
            Action::UpdatePlayerProfile => Tier::SelfEdit {
                admin_override: true,
            },
            Action::LinkSecondaryIdentity => Tier::SelfEdit {
                admin_override: false,
            },
            Action::AssignPlayerTeam
            | Action::CreateSeason
            | Action::UpdateSeason
            | Action::DeleteSeason => Tier::AdminOnly,
            Action::CreateStaff | Action::DeleteStaff => match self.staff_writes {
                StaffWritePolicy::Admin => Tier::AdminOnly,
                StaffWritePolicy::Open => Tier::Open,
            },
        }
    }

    /// Evaluates the decision list.
    ///
    /// `target_owner` is the player whose profile the action edits; it only
    /// matters for self-editable actions.
    #[must_use]
    pub fn evaluate(
        &self,
        context: Option<&SessionContext>,
        action: Action,
        target_owner: Option<PlayerId>,
    ) -> Decision {
        match self.tier(action) {
            Tier::Public => Decision::Allow(AccessScope::Restricted),
            Tier::Open => Decision::Allow(AccessScope::Elevated),
            Tier::SelfEdit { admin_override } => {
                let Some(context) = context else {
                    return Decision::Unauthorized;
                };
                if admin_override && context.is_admin() {
                    return Decision::Allow(AccessScope::Elevated);
                }
                match target_owner {
                    Some(owner) if context.owns_player(owner) => {
                        Decision::Allow(AccessScope::Elevated)
                    }
                    _ => Decision::Forbidden,
                }
            }
            Tier::AdminOnly => match context {
                None => Decision::Unauthorized,
                Some(context) if context.is_admin() => Decision::Allow(AccessScope::Elevated),
                Some(_) => Decision::Forbidden,
            },
        }
    }

    /// Evaluates the policy and converts the decision into a result.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthzError`] when the decision is a denial.
    pub fn authorize(
        &self,
        context: Option<&SessionContext>,
        action: Action,
        target_owner: Option<PlayerId>,
    ) -> Result<AccessScope, AuthzError> {
        let decision = self.evaluate(context, action, target_owner);
        debug!(
            action = %action,
            resource = %action.resource_type(),
            read = action.is_read(),
            subject = context.map(SessionContext::subject),
            allowed = decision.is_allowed(),
            ?decision,
            "authorization decision"
        );
        decision.into_result(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRITES: [Action; 8] = [
        Action::UpdatePlayerProfile,
        Action::LinkSecondaryIdentity,
        Action::AssignPlayerTeam,
        Action::CreateSeason,
        Action::UpdateSeason,
        Action::DeleteSeason,
        Action::CreateStaff,
        Action::DeleteStaff,
    ];

    const READS: [Action; 5] = [
        Action::ListPlayers,
        Action::ViewPlayer,
        Action::ListSeasons,
        Action::ViewSeason,
        Action::ListStaff,
    ];

    #[test]
    fn reads_are_public_and_restricted() {
        let policy = Policy::default();
        let member = SessionContext::player("acct", PlayerId::new());
        for action in READS {
            assert_eq!(
                policy.evaluate(None, action, None),
                Decision::Allow(AccessScope::Restricted)
            );
            assert_eq!(
                policy.evaluate(Some(&member), action, None),
                Decision::Allow(AccessScope::Restricted)
            );
        }
    }

    #[test]
    fn public_tier_is_exactly_the_read_actions() {
        let policy = Policy::new(StaffWritePolicy::Open);
        for action in READS {
            assert!(action.is_read());
            assert_eq!(policy.tier(action), Tier::Public);
        }
        for action in WRITES {
            assert!(!action.is_read());
            assert_ne!(policy.tier(action), Tier::Public);
        }
    }

    #[test]
    fn every_write_needs_a_session_by_default() {
        let policy = Policy::default();
        for action in WRITES {
            assert_eq!(
                policy.evaluate(None, action, Some(PlayerId::new())),
                Decision::Unauthorized,
                "{action}"
            );
        }
    }

    #[test]
    fn self_edit_allows_owner_only() {
        let policy = Policy::default();
        let mine = PlayerId::new();
        let theirs = PlayerId::new();
        let context = SessionContext::player("acct", mine);

        assert_eq!(
            policy.evaluate(Some(&context), Action::LinkSecondaryIdentity, Some(mine)),
            Decision::Allow(AccessScope::Elevated)
        );
        assert_eq!(
            policy.evaluate(Some(&context), Action::LinkSecondaryIdentity, Some(theirs)),
            Decision::Forbidden
        );
        assert_eq!(
            policy.evaluate(Some(&context), Action::UpdatePlayerProfile, Some(theirs)),
            Decision::Forbidden
        );
    }

    #[test]
    fn session_without_linked_player_cannot_self_edit() {
        let policy = Policy::default();
        let context = SessionContext::new("acct".to_string(), false, None, None);
        assert_eq!(
            policy.evaluate(
                Some(&context),
                Action::LinkSecondaryIdentity,
                Some(PlayerId::new())
            ),
            Decision::Forbidden
        );
    }

    #[test]
    fn admin_may_edit_any_profile_but_not_link_identity() {
        let policy = Policy::default();
        let admin = SessionContext::admin("root", None);
        let target = PlayerId::new();

        assert_eq!(
            policy.evaluate(Some(&admin), Action::UpdatePlayerProfile, Some(target)),
            Decision::Allow(AccessScope::Elevated)
        );
        assert_eq!(
            policy.evaluate(Some(&admin), Action::LinkSecondaryIdentity, Some(target)),
            Decision::Forbidden
        );
    }

    #[test]
    fn admin_only_actions_distinguish_401_and_403() {
        let policy = Policy::default();
        let member = SessionContext::player("acct", PlayerId::new());
        let admin = SessionContext::admin("root", None);

        for action in [
            Action::CreateSeason,
            Action::UpdateSeason,
            Action::DeleteSeason,
            Action::AssignPlayerTeam,
            Action::CreateStaff,
            Action::DeleteStaff,
        ] {
            assert_eq!(policy.evaluate(None, action, None), Decision::Unauthorized);
            assert_eq!(
                policy.evaluate(Some(&member), action, None),
                Decision::Forbidden
            );
            assert_eq!(
                policy.evaluate(Some(&admin), action, None),
                Decision::Allow(AccessScope::Elevated)
            );
        }
    }

    #[test]
    fn open_staff_writes_skip_the_session_check() {
        let policy = Policy::new(StaffWritePolicy::Open);
        assert_eq!(
            policy.evaluate(None, Action::CreateStaff, None),
            Decision::Allow(AccessScope::Elevated)
        );
        assert_eq!(
            policy.evaluate(None, Action::DeleteStaff, None),
            Decision::Allow(AccessScope::Elevated)
        );
        // seasons stay admin-only
        assert_eq!(
            policy.evaluate(None, Action::CreateSeason, None),
            Decision::Unauthorized
        );
    }

    #[test]
    fn authorize_maps_denials_to_errors() {
        let policy = Policy::default();
        let member = SessionContext::player("acct", PlayerId::new());

        assert_eq!(
            policy.authorize(None, Action::DeleteSeason, None),
            Err(AuthzError::NotAuthenticated {
                action: Action::DeleteSeason
            })
        );
        assert_eq!(
            policy.authorize(Some(&member), Action::DeleteSeason, None),
            Err(AuthzError::Forbidden {
                action: Action::DeleteSeason
            })
        );
        assert_eq!(
            policy.authorize(None, Action::ListSeasons, None),
            Ok(AccessScope::Restricted)
        );
    }

    #[test]
    fn staff_write_policy_parses_lowercase() {
        let parsed: StaffWritePolicy = serde_json::from_str("\"open\"").expect("parse");
        assert_eq!(parsed, StaffWritePolicy::Open);
        assert_eq!(StaffWritePolicy::default(), StaffWritePolicy::Admin);
    }
}
