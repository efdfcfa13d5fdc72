//! Core domain types and utilities for the league portal.
//!
//! This crate provides the identifier types and error handling foundation
//! shared by every other crate in the workspace.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, PlayerId, SeasonId, StaffId, TeamId};
