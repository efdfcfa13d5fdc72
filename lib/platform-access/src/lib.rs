//! Platform access for the league portal.
//!
//! This crate provides:
//! - Role flags (`Role`, `RoleSet`) carried by a session
//! - Persisted sessions (`Session`, `SessionId`) and the derived
//!   authorization context (`SessionContext`)
//! - The `SessionStore` seam and an in-memory implementation
//! - Primary linked identity claims handed over by the identity provider
//!
//! Authentication itself (the game-platform handshake and cookie issuance)
//! happens outside this workspace. A session row is trusted as given.
//!
//! # Example
//!
//! ```
//! use league_portal_core::PlayerId;
//! use league_portal_platform_access::{RoleSet, Session, SessionId};
//! use chrono::Duration;
//!
//! let player_id = PlayerId::new();
//! let session = Session::new(
//!     SessionId::new("sess_abc123".to_string()),
//!     "76561198000000001".to_string(),
//!     RoleSet::admin(),
//!     Duration::hours(8),
//! )
//! .with_player(player_id, None);
//!
//! let context = session.context();
//! assert!(context.is_admin());
//! assert_eq!(context.player_id(), Some(player_id));
//! ```

pub mod context;
pub mod error;
pub mod identity;
pub mod role;
pub mod session;
pub mod store;

pub use context::SessionContext;
pub use error::AuthenticationError;
pub use identity::PrimaryIdentity;
pub use role::{Role, RoleSet};
pub use session::{Session, SessionId};
pub use store::{MemorySessionStore, SessionStore};
