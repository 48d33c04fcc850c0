//! Result and error types for Roamer.

use thiserror::Error;

/// Result type for Roamer operations
pub type RoamerResult<T> = Result<T, RoamerError>;

/// Errors that can occur in Roamer
#[derive(Debug, Error)]
pub enum RoamerError {
    /// A live UI read was invalidated because the list or page re-rendered
    #[error("Stale view: {message}")]
    StaleView {
        /// What was being read
        message: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// No suggestion matched the requested text
    #[error("No suggestion matched '{target}'")]
    NoMatchFound {
        /// Normalized target text
        target: String,
    },

    /// Date text (or a date pattern) could not be parsed
    #[error("Invalid date '{input}' for format '{format}'")]
    InvalidDateFormat {
        /// Offending input
        input: String,
        /// Format it was parsed against
        format: String,
    },

    /// Calendar page label could not be parsed
    #[error("Invalid calendar label '{label}' for format '{format}'")]
    InvalidPageLabel {
        /// Label read from the widget
        label: String,
        /// Expected label format
        format: String,
    },

    /// No day cell on the displayed page carries the requested day
    #[error("Day {day} not found on the displayed calendar page")]
    DayNotFound {
        /// Day of month
        day: u32,
    },

    /// Calendar did not reach the target period within the page-turn cap
    #[error("Calendar did not reach {target} after {attempts} page turns")]
    NavigationTimeout {
        /// Page turns performed
        attempts: usize,
        /// Target period, as "YYYY-MM"
        target: String,
    },

    /// Target period lies behind the displayed one but the widget cannot page back
    #[error("Calendar cannot page back from {displayed} to {target}")]
    NavigationUnsupported {
        /// Displayed period, as "YYYY-MM"
        displayed: String,
        /// Target period, as "YYYY-MM"
        target: String,
    },

    /// Element lookup returned nothing
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that was queried
        selector: String,
    },

    /// Time-of-day text could not be parsed
    #[error("Invalid time '{input}': expected HH:mm AM|PM")]
    InvalidTime {
        /// Offending input
        input: String,
    },

    /// Requested data key or scenario block is missing
    #[error("Data not found: {key}")]
    DataNotFound {
        /// Missing key
        key: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl RoamerError {
    /// Create a stale-view error
    #[must_use]
    pub fn stale(message: impl Into<String>) -> Self {
        Self::StaleView {
            message: message.into(),
        }
    }

    /// Whether this error is a transient stale read
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::StaleView { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoamerError::Timeout { ms: 10_000 };
        assert_eq!(err.to_string(), "Operation timed out after 10000ms");

        let err = RoamerError::NoMatchFound {
            target: "goa".into(),
        };
        assert!(err.to_string().contains("goa"));

        let err = RoamerError::NavigationTimeout {
            attempts: 5,
            target: "2030-01".into(),
        };
        assert!(err.to_string().contains("5 page turns"));
    }

    #[test]
    fn test_is_stale() {
        assert!(RoamerError::stale("suggestions").is_stale());
        assert!(!RoamerError::DayNotFound { day: 31 }.is_stale());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RoamerError = io.into();
        assert!(matches!(err, RoamerError::Io(_)));
    }
}
