//! Typed identifiers for league entities.
//!
//! Every id wraps a ULID, so rows created later sort later. Two textual
//! forms exist:
//! - `Display` and the database use a short entity prefix (`ssn_01J...`)
//! - JSON uses the bare ULID (`"01J..."`)
//!
//! Parsing accepts either form, which lets path segments and request
//! bodies carry whichever the client has.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// A string that is not a valid id of the expected kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// Name of the id type that was expected.
    pub id_type: &'static str,
    /// Why the input was rejected.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! league_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Generates a fresh id.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// The bare ULID, as used on the wire.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Ulid::from_string(bare).map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    reason: e.to_string(),
                })
            }
        }
    };
}

league_id!(
    /// A player profile.
    PlayerId => "ply"
);

league_id!(
    /// A season.
    SeasonId => "ssn"
);

league_id!(
    /// A staff assignment.
    StaffId => "stf"
);

league_id!(
    /// A team. Teams themselves are managed outside the league portal.
    TeamId => "team"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_entity_prefix() {
        assert!(PlayerId::new().to_string().starts_with("ply_"));
        assert!(SeasonId::new().to_string().starts_with("ssn_"));
        assert!(StaffId::new().to_string().starts_with("stf_"));
        assert!(TeamId::new().to_string().starts_with("team_"));
    }

    #[test]
    fn parses_both_textual_forms() {
        let id = SeasonId::new();
        assert_eq!(id.to_string().parse::<SeasonId>(), Ok(id));
        assert_eq!(id.as_ulid().to_string().parse::<SeasonId>(), Ok(id));
    }

    #[test]
    fn rejects_another_entitys_prefix() {
        let player = PlayerId::new();
        assert!(player.to_string().parse::<SeasonId>().is_err());
    }

    #[test]
    fn parse_error_names_the_type() {
        let err = "not_a_ulid".parse::<TeamId>().unwrap_err();
        assert_eq!(err.id_type, "TeamId");
        assert!(err.to_string().starts_with("not a valid TeamId"));
    }

    #[test]
    fn later_ids_sort_later() {
        let first = StaffId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = StaffId::new();
        assert!(first < second);
    }

    #[test]
    fn json_uses_bare_ulid() {
        let id = PlayerId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.as_ulid()));
        let back: PlayerId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
