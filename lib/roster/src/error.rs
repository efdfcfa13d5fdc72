//! Error types for the roster crate.

use std::fmt;

/// Errors from a data store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store failed or rejected a query.
    QueryFailed {
        entity: &'static str,
        operation: &'static str,
        reason: String,
    },
    /// A stored row could not be turned into a record.
    InvalidRow { entity: &'static str, reason: String },
}

impl StoreError {
    /// Shorthand for a failed query.
    #[must_use]
    pub fn query(entity: &'static str, operation: &'static str, reason: impl fmt::Display) -> Self {
        Self::QueryFailed {
            entity,
            operation,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryFailed {
                entity,
                operation,
                reason,
            } => write!(f, "{operation} on {entity} failed: {reason}"),
            Self::InvalidRow { entity, reason } => {
                write!(f, "invalid {entity} row: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// A request failed validation before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Request field at fault, in its wire spelling.
    pub field: &'static str,
    /// Message shown to the caller.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for a field.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Returns the trimmed value if it is present and not blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_failed_display() {
        let err = StoreError::query("season", "insert", "duplicate key");
        assert_eq!(err.to_string(), "insert on season failed: duplicate key");
    }

    #[test]
    fn validation_error_displays_message_only() {
        let err = ValidationError::new("name", "Season name is required");
        assert_eq!(err.to_string(), "Season name is required");
        assert_eq!(err.field, "name");
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  a ".to_string())), Some("a".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
