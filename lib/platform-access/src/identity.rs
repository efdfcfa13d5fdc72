//! Primary linked identity claims.
//!
//! After the game-platform handshake succeeds, the identity provider
//! integration hands the verified account over as a [`PrimaryIdentity`].
//! Player profiles are upserted keyed by `account_id`.

use serde::{Deserialize, Serialize};

use crate::error::AuthenticationError;

/// A verified primary game-platform account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryIdentity {
    /// Stable account id on the game platform.
    pub account_id: String,
    /// Account username at sign-in time.
    pub username: String,
    /// Avatar URL published by the platform.
    pub avatar_url: Option<String>,
}

impl PrimaryIdentity {
    /// Creates a new set of claims.
    #[must_use]
    pub fn new(account_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            username: username.into(),
            avatar_url: None,
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url;
        self
    }

    /// Checks that the claims identify an account.
    ///
    /// # Errors
    ///
    /// Returns `MissingClaim` if the account id or username is blank.
    pub fn validate(&self) -> Result<(), AuthenticationError> {
        if self.account_id.trim().is_empty() {
            return Err(AuthenticationError::MissingClaim {
                claim: "account_id".to_string(),
            });
        }
        if self.username.trim().is_empty() {
            return Err(AuthenticationError::MissingClaim {
                claim: "username".to_string(),
            });
        }
        Ok(())
    }
}
