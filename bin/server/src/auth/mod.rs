//! Authentication boundary for the league portal server.
//!
//! This module provides:
//! - The session extractor that turns a `session` cookie into an
//!   authorization context
//! - The sign-in hook the identity provider integration calls after a
//!   successful game-platform handshake
//!
//! The handshake itself and cookie issuance live outside this server.
//! Whether a caller may perform an action is decided by the policy in
//! `league_portal_authz`, never here.

pub mod middleware;
pub mod sign_in;

pub use middleware::{CurrentSession, SESSION_COOKIE};
pub use sign_in::{SignIn, record_sign_in};
