//! Error types for the platform-access crate.

use std::fmt;

/// Errors from recording or resolving who a caller is.
///
/// An unknown or expired session is not an error: it simply means the
/// caller is signed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// A required claim was missing from the identity provider's hand-off.
    MissingClaim { claim: String },
    /// A session or player row could not be read or written.
    StoreFailed { reason: String },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingClaim { claim } => {
                write!(f, "missing required claim: {claim}")
            }
            Self::StoreFailed { reason } => {
                write!(f, "store failed during authentication: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_claim_display() {
        let err = AuthenticationError::MissingClaim {
            claim: "account_id".to_string(),
        };
        assert_eq!(err.to_string(), "missing required claim: account_id");
    }

    #[test]
    fn store_failed_display() {
        let err = AuthenticationError::StoreFailed {
            reason: "connection reset".to_string(),
        };
        assert!(err.to_string().contains("connection reset"));
    }
}
