//! Sessions issued by the identity provider integration.
//!
//! A session is created after a successful primary-identity sign-in and is
//! looked up by the opaque id stored in the caller's cookie. The league
//! portal never mints a session on its own initiative; it trusts the row.

use chrono::{DateTime, Duration, Utc};
use league_portal_core::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};

use crate::context::SessionContext;
use crate::role::RoleSet;

/// Unique identifier for a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new session ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh random session ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,
    /// Primary linked identity (game-platform account id) of the caller.
    subject: String,
    /// Roles captured at sign-in.
    roles: RoleSet,
    /// Player profile linked to the primary identity, if one exists.
    player_id: Option<PlayerId>,
    /// Team of the linked player at sign-in.
    team_id: Option<TeamId>,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session expires.
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session valid for the given duration.
    #[must_use]
    pub fn new(id: SessionId, subject: String, roles: RoleSet, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            subject,
            roles,
            player_id: None,
            team_id: None,
            created_at: now,
            expires_at: now + duration,
        }
    }

    /// Reconstitutes a session from storage.
    #[must_use]
    pub fn with_all_fields(
        id: SessionId,
        subject: String,
        roles: RoleSet,
        player_id: Option<PlayerId>,
        team_id: Option<TeamId>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            subject,
            roles,
            player_id,
            team_id,
            created_at,
            expires_at,
        }
    }

    /// Links the session to a player profile.
    #[must_use]
    pub fn with_player(mut self, player_id: PlayerId, team_id: Option<TeamId>) -> Self {
        self.player_id = Some(player_id);
        self.team_id = team_id;
        self
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the primary linked identity.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the session roles.
    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Returns the linked player, if any.
    #[must_use]
    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id
    }

    /// Returns the linked team, if any.
    #[must_use]
    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the session carries the administrator flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    /// Derives the authorization context for this session.
    #[must_use]
    pub fn context(&self) -> SessionContext {
        SessionContext::new(
            self.subject.clone(),
            self.roles.is_admin(),
            self.player_id,
            self.team_id,
        )
    }
}
