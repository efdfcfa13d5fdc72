//! Authorization vocabulary: resources, actions and data store scopes.

use std::fmt;

/// Resource types guarded by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// A player profile.
    Player,
    /// A season.
    Season,
    /// A staff assignment.
    Staff,
}

impl ResourceType {
    /// Returns the resource name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Season => "season",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operation a caller wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// List player profiles.
    ListPlayers,
    /// Read one player profile.
    ViewPlayer,
    /// Edit display name, description or picture of a profile.
    UpdatePlayerProfile,
    /// Set the chat-platform username on a profile.
    LinkSecondaryIdentity,
    /// Move a player to another team.
    AssignPlayerTeam,
    /// List seasons.
    ListSeasons,
    /// Read one season.
    ViewSeason,
    /// Create a season.
    CreateSeason,
    /// Update a season.
    UpdateSeason,
    /// Delete a season.
    DeleteSeason,
    /// List staff assignments.
    ListStaff,
    /// Add a staff assignment.
    CreateStaff,
    /// Remove a staff assignment.
    DeleteStaff,
}

impl Action {
    /// Returns the resource type the action targets.
    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::ListPlayers
            | Self::ViewPlayer
            | Self::UpdatePlayerProfile
            | Self::LinkSecondaryIdentity
            | Self::AssignPlayerTeam => ResourceType::Player,
            Self::ListSeasons
            | Self::ViewSeason
            | Self::CreateSeason
            | Self::UpdateSeason
            | Self::DeleteSeason => ResourceType::Season,
            Self::ListStaff | Self::CreateStaff | Self::DeleteStaff => ResourceType::Staff,
        }
    }

    /// Returns true for side-effect-free reads.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Self::ListPlayers
                | Self::ViewPlayer
                | Self::ListSeasons
                | Self::ViewSeason
                | Self::ListStaff
        )
    }

    /// Returns the action name used in logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListPlayers => "list_players",
            Self::ViewPlayer => "view_player",
            Self::UpdatePlayerProfile => "update_player_profile",
            Self::LinkSecondaryIdentity => "link_secondary_identity",
            Self::AssignPlayerTeam => "assign_player_team",
            Self::ListSeasons => "list_seasons",
            Self::ViewSeason => "view_season",
            Self::CreateSeason => "create_season",
            Self::UpdateSeason => "update_season",
            Self::DeleteSeason => "delete_season",
            Self::ListStaff => "list_staff",
            Self::CreateStaff => "create_staff",
            Self::DeleteStaff => "delete_staff",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which data store handle an allowed operation may use.
///
/// `Restricted` connections are subject to the store's row-level policies;
/// `Elevated` connections bypass them and are only handed out after the
/// policy has authorized a write itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessScope {
    /// Respects row-level access policies.
    Restricted,
    /// Bypasses row-level access policies.
    Elevated,
}

impl AccessScope {
    /// Returns the scope name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restricted => "restricted",
            Self::Elevated => "elevated",
        }
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_flagged() {
        assert!(Action::ListSeasons.is_read());
        assert!(Action::ViewPlayer.is_read());
        assert!(!Action::CreateSeason.is_read());
        assert!(!Action::LinkSecondaryIdentity.is_read());
    }

    #[test]
    fn actions_map_to_resources() {
        assert_eq!(Action::AssignPlayerTeam.resource_type(), ResourceType::Player);
        assert_eq!(Action::DeleteSeason.resource_type(), ResourceType::Season);
        assert_eq!(Action::CreateStaff.resource_type(), ResourceType::Staff);
    }
}
