//! Player profiles.
//!
//! A profile is created on the first successful primary-identity sign-in and
//! is never hard-deleted here. The chat-platform username (the secondary
//! linked identity) is written by the owning player through the link
//! endpoint, or by an administrator through a profile update.

use chrono::{DateTime, Utc};
use league_portal_core::{PlayerId, TeamId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ValidationError, non_blank};

/// A stored player profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    /// Primary linked identity: game-platform account id.
    pub platform_account_id: String,
    /// Game-platform username as of the last sign-in.
    pub platform_username: String,
    /// Secondary linked identity: chat-platform username.
    pub discord_username: Option<String>,
    pub display_name: String,
    pub description: Option<String>,
    /// Profile picture reference.
    pub avatar_url: Option<String>,
    pub team_id: Option<TeamId>,
    /// Role flag granting administrator sessions at sign-in.
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Creates the profile for a first-time sign-in.
    ///
    /// The display name starts out as the platform username.
    #[must_use]
    pub fn register(
        platform_account_id: impl Into<String>,
        platform_username: impl Into<String>,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let platform_username = platform_username.into();
        Self {
            id: PlayerId::new(),
            platform_account_id: platform_account_id.into(),
            display_name: platform_username.clone(),
            platform_username,
            discord_username: None,
            description: None,
            avatar_url,
            team_id: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies validated profile changes in place.
    pub fn apply(&mut self, changes: &PlayerProfileChanges) {
        if let Some(display_name) = &changes.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(avatar_url) = &changes.avatar_url {
            self.avatar_url = avatar_url.clone();
        }
        if let Some(team_id) = changes.team_id {
            self.team_id = team_id;
        }
        if let Some(discord_username) = &changes.discord_username {
            self.discord_username = discord_username.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Distinguishes an absent field from an explicit `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `PUT /players/{id}`.
///
/// Absent fields are left unchanged; `null` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub team_id: Option<Option<TeamId>>,
    #[serde(default, deserialize_with = "present")]
    pub discord_username: Option<Option<String>>,
}

/// Validated profile changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerProfileChanges {
    pub display_name: Option<String>,
    pub description: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub team_id: Option<Option<TeamId>>,
    pub discord_username: Option<Option<String>>,
}

impl PlayerProfileChanges {
    /// Returns true if the changes move the player between teams.
    #[must_use]
    pub fn touches_team(&self) -> bool {
        self.team_id.is_some()
    }

    /// Returns true if the changes rewrite the chat-platform username.
    #[must_use]
    pub fn touches_discord(&self) -> bool {
        self.discord_username.is_some()
    }
}

impl UpdatePlayerRequest {
    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Fails when no field is present or the display name is blank.
    pub fn validate(self) -> Result<PlayerProfileChanges, ValidationError> {
        if self.display_name.is_none()
            && self.description.is_none()
            && self.avatar_url.is_none()
            && self.team_id.is_none()
            && self.discord_username.is_none()
        {
            return Err(ValidationError::new(
                "body",
                "No profile fields provided",
            ));
        }

        let display_name = match self.display_name {
            Some(name) => Some(non_blank(Some(name)).ok_or_else(|| {
                ValidationError::new("displayName", "Display name cannot be empty")
            })?),
            None => None,
        };

        Ok(PlayerProfileChanges {
            display_name,
            description: self.description.map(non_blank),
            avatar_url: self.avatar_url.map(non_blank),
            team_id: self.team_id,
            discord_username: self.discord_username.map(non_blank),
        })
    }
}

/// Body of `PATCH /players/{id}/discord`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordLinkRequest {
    #[serde(default)]
    pub discord_username: Option<String>,
}

impl DiscordLinkRequest {
    /// Validates the request, returning the trimmed username.
    ///
    /// # Errors
    ///
    /// Fails when the username is missing or blank.
    pub fn validate(self) -> Result<String, ValidationError> {
        non_blank(self.discord_username)
            .ok_or_else(|| ValidationError::new("discordUsername", "Discord username is required"))
    }
}
