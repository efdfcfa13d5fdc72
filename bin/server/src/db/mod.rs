//! Postgres repositories for the league portal.
//!
//! Each repository implements one of the store traits over a `PgPool`. The
//! same repository types serve both the restricted and the elevated
//! connection; only the pool differs.

pub mod player;
pub mod season;
pub mod session;
pub mod staff;

pub use player::PlayerRepository;
pub use season::SeasonRepository;
pub use session::SessionRepository;
pub use staff::StaffRepository;

use league_portal_roster::StoreError;
use std::str::FromStr;

/// Parses a stored id column.
fn decode_id<T>(entity: &'static str, raw: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(raw).map_err(|e| StoreError::InvalidRow {
        entity,
        reason: format!("invalid id '{raw}': {e}"),
    })
}
