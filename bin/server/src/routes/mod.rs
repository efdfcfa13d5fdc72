//! HTTP handlers.
//!
//! Every mutating handler runs the same three steps in order: validate the
//! request, ask the policy for a store scope, then perform the write with
//! that scope's handles.

pub mod admin;
pub mod league;
pub mod players;
pub mod seasons;
pub mod staff;

use serde::Serialize;
use std::str::FromStr;

use crate::error::ApiError;

/// Body returned by deletes and the legacy login.
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub const OK: Self = Self { success: true };
}

/// Parses an id taken from the path or query string.
fn parse_id<T: FromStr>(
    raw: &str,
    field: &'static str,
    message: &'static str,
) -> Result<T, ApiError> {
    T::from_str(raw.trim()).map_err(|_| ApiError::invalid(field, message))
}
