//! Advisory failure type.

use derive_more::{Display, Error};
use tracing::{error, instrument, warn};

/// What went wrong while obtaining a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AdvisorErrorKind {
    /// Request could not be sent or the connection failed.
    #[display("transport")]
    Transport,
    /// No response within the configured timeout.
    #[display("timeout")]
    Timeout,
    /// The service answered with an error status.
    #[display("service")]
    Service,
    /// The service answered without any content.
    #[display("empty response")]
    EmptyResponse,
    /// The payload is not the expected two-field record.
    #[display("malformed payload")]
    Malformed,
    /// No advisor is configured (missing API key, offline mode).
    #[display("unavailable")]
    Unavailable,
}

impl AdvisorErrorKind {
    /// Failures expected in normal operation: no advisor configured, or a
    /// slow service. Logged at warn level rather than error.
    pub fn is_routine(self) -> bool {
        matches!(self, AdvisorErrorKind::Unavailable | AdvisorErrorKind::Timeout)
    }
}

/// Advisory failure with location tracking.
///
/// Never leaves the advisor: [`crate::HintAdvisor`] turns it into a fallback hint.
#[derive(Debug, Clone, Display, Error)]
#[display("Advisor error ({}): {} at {}:{}", kind, message, file, line)]
pub struct AdvisorError {
    /// Failure category.
    pub kind: AdvisorErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AdvisorError {
    /// Creates a new advisor error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: AdvisorErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        if kind.is_routine() {
            warn!(%kind, error_message = %message, "Advisor error created");
        } else {
            error!(%kind, error_message = %message, "Advisor error created");
        }
        Self {
            kind,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_kinds() {
        assert!(AdvisorErrorKind::Unavailable.is_routine());
        assert!(AdvisorErrorKind::Timeout.is_routine());
        for kind in [
            AdvisorErrorKind::Transport,
            AdvisorErrorKind::Service,
            AdvisorErrorKind::EmptyResponse,
            AdvisorErrorKind::Malformed,
        ] {
            assert!(!kind.is_routine(), "{} should log as error", kind);
        }
    }

    #[test]
    fn test_new_records_caller_location() {
        let err = AdvisorError::new(AdvisorErrorKind::Unavailable, "offline");
        assert_eq!(err.kind, AdvisorErrorKind::Unavailable);
        assert_eq!(err.message, "offline");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Advisor error (unavailable): offline"));
    }
}
