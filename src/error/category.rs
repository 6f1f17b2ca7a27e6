//! Error category classification.
//!
//! Categories drive how an error is presented in the status area and
//! whether the operator can simply try again.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The assistant endpoint could not be reached (connection, DNS, timeout).
    Network,

    /// The assistant endpoint answered with a failure status or a body we
    /// could not use.
    Server,

    /// Filesystem or process failures (snapshot writes, editor, shell).
    System,

    /// The host platform lacks a capability (no clipboard, no display).
    Platform,

    /// Missing or invalid settings.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if the failed operation can reasonably be retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::System => "system",
            ErrorCategory::Platform => "platform",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Hint shown after the error text in the status area.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "check your connection and press Enter to retry",
            ErrorCategory::Server => "press Enter to retry",
            ErrorCategory::System => "check file permissions and disk space",
            ErrorCategory::Platform => "this feature is unavailable here",
            ErrorCategory::Configuration => "check your environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_categories() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
        assert!(!ErrorCategory::Platform.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(ErrorCategory::Platform.to_string(), "platform");
    }
}
