//! Result alias shared by the league portal crates.
//!
//! Errors that cross an I/O seam (the data store, the session store) travel
//! as a `rootcause` [`Report`] whose context is the crate's own error enum:
//! `StoreError` in the roster crate, `AuthenticationError` in platform
//! access. A layer that needs to restate a failure in its own terms wraps
//! the report with `.context()` rather than flattening it to a string, so
//! the store's detail is still there when the server logs it.

use rootcause::Report;

/// `Result` carrying a [`Report`] with context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct SeasonMissing;

    impl fmt::Display for SeasonMissing {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("season missing")
        }
    }

    impl std::error::Error for SeasonMissing {}

    fn display_order(found: bool) -> Result<i32, SeasonMissing> {
        if found { Ok(4) } else { Err(SeasonMissing.into()) }
    }

    #[test]
    fn ok_values_pass_through() {
        assert_eq!(display_order(true).expect("found"), 4);
    }

    #[test]
    fn domain_errors_convert_into_reports() {
        assert!(display_order(false).is_err());
    }
}
