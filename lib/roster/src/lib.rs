//! League roster domain: players, seasons and staff.
//!
//! This crate provides:
//! - Stored records (`Player`, `Season`, `StaffMember`)
//! - One request schema per write operation, validated before any store call
//! - Store traits, one per table, behind which Postgres or memory sits
//! - The season lifecycle manager that keeps at most one season current

pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod player;
pub mod season;
pub mod staff;
pub mod store;

pub use error::{StoreError, ValidationError};
pub use lifecycle::SeasonLifecycle;
pub use memory::MemoryRosterStore;
pub use player::{
    DiscordLinkRequest, Player, PlayerProfileChanges, UpdatePlayerRequest,
};
pub use season::{CreateSeasonRequest, NewSeason, Season, SeasonChanges, UpdateSeasonRequest};
pub use staff::{CreateStaffRequest, NewStaff, StaffMember};
pub use store::{PlayerStore, SeasonStore, StaffStore};
