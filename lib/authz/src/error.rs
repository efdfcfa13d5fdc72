//! Authorization error types.

use std::fmt;

use crate::types::Action;

/// Authorization failures, one per denial outcome of the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The action requires a session and none was presented.
    NotAuthenticated {
        /// The action that was attempted.
        action: Action,
    },
    /// A session was presented but lacks the required ownership or role.
    Forbidden {
        /// The action that was attempted.
        action: Action,
    },
}

impl fmt::Display for AuthzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated { action } => {
                write!(f, "'{}' requires a signed-in session", action)
            }
            Self::Forbidden { action } => {
                write!(f, "session is not permitted to '{}'", action)
            }
        }
    }
}

impl std::error::Error for AuthzError {}
