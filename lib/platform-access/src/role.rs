//! Role flags carried by a session.
//!
//! Roles are captured once, at sign-in, from the player's stored admin
//! flag. Changing the flag takes effect at the player's next sign-in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A league role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Any signed-in player.
    Member,
    /// League administrator: manages seasons, staff and team assignments.
    Admin,
}

impl Role {
    /// Lowercase name, as stored.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The roles a session holds. Stored as a JSON array (`["member","admin"]`).
///
/// Every administrator is also a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    /// Roles of an ordinary signed-in player.
    #[must_use]
    pub fn member() -> Self {
        Self(vec![Role::Member])
    }

    /// Roles of an administrator.
    #[must_use]
    pub fn admin() -> Self {
        Self(vec![Role::Member, Role::Admin])
    }

    /// Roles for a player given their stored admin flag.
    #[must_use]
    pub fn for_player(is_admin: bool) -> Self {
        if is_admin { Self::admin() } else { Self::member() }
    }

    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    #[must_use]
    pub fn is_member(&self) -> bool {
        self.contains(Role::Member)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.contains(Role::Admin)
    }

    /// The roles held, in grant order.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_grants_nothing() {
        let roles = RoleSet::default();
        assert!(!roles.is_member());
        assert!(!roles.is_admin());
    }

    #[test]
    fn admin_is_also_member() {
        let roles = RoleSet::admin();
        assert!(roles.is_member());
        assert!(roles.is_admin());
        assert!(!RoleSet::member().is_admin());
    }

    #[test]
    fn for_player_follows_admin_flag() {
        assert_eq!(RoleSet::for_player(true), RoleSet::admin());
        assert_eq!(RoleSet::for_player(false), RoleSet::member());
    }

    #[test]
    fn stored_as_plain_array() {
        let json = serde_json::to_string(&RoleSet::admin()).expect("serialize");
        assert_eq!(json, r#"["member","admin"]"#);
        let parsed: RoleSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, RoleSet::admin());
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
