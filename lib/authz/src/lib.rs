//! Authorization policy for the league portal.
//!
//! The policy is a pure function of (session context, action, target owner).
//! It performs no I/O. Callers map [`Decision::Unauthorized`] to 401 and
//! [`Decision::Forbidden`] to 403, and use the [`AccessScope`] carried by an
//! allow decision to pick which data store handle the operation may touch.

mod error;
mod policy;
mod types;

pub use error::AuthzError;
pub use policy::{Decision, Policy, StaffWritePolicy};
pub use types::{AccessScope, Action, ResourceType};
