//! Errors that callers are expected to match on.
//!
//! Everything else (network failures, unknown ids, quota exhaustion) surfaces as an opaque
//! [`eyre::Report`] straight from the YouTube API client.

use thiserror::Error;

/// Reasons an account cannot be resolved against the signed-in identity.
///
/// These are returned wrapped in an [`eyre::Report`]; use
/// [`eyre::Report::downcast_ref`] to tell them apart from lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("no account is currently signed in")]
    NoActiveAccount,

    #[error(
        "the currently selected account (ID {}) is not the requested one (ID {requested})",
        .active.as_deref().unwrap_or("none")
    )]
    AccountMismatch {
        requested: String,
        active: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mismatch_names_both_accounts() {
        let err = AccountError::AccountMismatch {
            requested: "42".to_string(),
            active: Some("7".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "the currently selected account (ID 7) is not the requested one (ID 42)"
        );
    }

    #[test]
    fn survives_wrapping_in_report() {
        let report = eyre::Report::new(AccountError::NoActiveAccount);
        assert_eq!(
            report.downcast_ref::<AccountError>(),
            Some(&AccountError::NoActiveAccount)
        );
    }
}
