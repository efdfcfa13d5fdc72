//! Staff assignments.
//!
//! A staff row always references an existing player. The store's foreign key
//! enforces that; requests are only checked for presence here.

use chrono::{DateTime, Utc};
use league_portal_core::{PlayerId, StaffId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ValidationError, non_blank};

/// A stored staff assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    pub player_id: PlayerId,
    /// Free-form role label, e.g. "Commissioner".
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    /// Builds the row for a validated creation request.
    #[must_use]
    pub fn new(new_staff: NewStaff) -> Self {
        Self {
            id: StaffId::new(),
            player_id: new_staff.player_id,
            role: new_staff.role,
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /staff`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A validated staff creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaff {
    pub player_id: PlayerId,
    pub role: String,
}

impl CreateStaffRequest {
    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Fails when either field is blank or the player id is malformed.
    pub fn validate(self) -> Result<NewStaff, ValidationError> {
        let player_id = non_blank(self.player_id)
            .ok_or_else(|| ValidationError::new("playerId", "Player ID is required"))?;
        let role = non_blank(self.role)
            .ok_or_else(|| ValidationError::new("role", "Role is required"))?;
        let player_id = PlayerId::from_str(&player_id)
            .map_err(|_| ValidationError::new("playerId", "Invalid player ID"))?;

        Ok(NewStaff { player_id, role })
    }
}
