// Error types for nocodb-playwright

use thiserror::Error;

/// Result type alias for page object operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the NocoDB UI
#[derive(Debug, Error)]
pub enum Error {
    /// Error raised by the underlying browser automation library
    ///
    /// Covers locator timeouts, closed targets and protocol failures.
    #[error("Playwright error: {0}")]
    Playwright(#[from] playwright_rs::Error),

    /// A UI assertion did not hold
    ///
    /// Raised immediately for single-shot checks such as menu item text or
    /// button enabled state.
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// A polling assertion never held within its timeout
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// Timeout waiting for a non-UI condition (e.g. a network request)
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The network gate was shut down while a waiter was still listening
    #[error("Network gate closed while waiting for {0}")]
    GateClosed(String),

    /// A field value did not have the shape its field type requires
    ///
    /// Geodata expects `"lat,long"`, date-time expects `"YYYY-MM-DD HH:mm"`.
    #[error("Invalid value '{value}' for {field_type} field: {reason}")]
    InvalidFieldValue {
        field_type: String,
        value: String,
        reason: String,
    },

    /// Unknown field type name passed to `FieldInput::parse`
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    pub(crate) fn invalid_field(
        field_type: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidFieldValue {
            field_type: field_type.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
