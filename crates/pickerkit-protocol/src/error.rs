//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while decoding requests or encoding responses.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A required request parameter is absent.
    #[error("missing request parameter: {name}")]
    MissingParameter { name: String },

    /// A request parameter could not be interpreted.
    #[error("invalid value for request parameter {name}: {value:?}")]
    InvalidParameter { name: String, value: String },

    /// The requested year/month does not describe a window.
    #[error("invalid visible window: year {year}, month {month}, {months} month(s)")]
    InvalidWindow { year: i32, month: u32, months: u32 },

    /// A form body was not valid percent-encoded UTF-8.
    #[error("malformed form body: {0}")]
    MalformedForm(#[from] std::string::FromUtf8Error),

    /// Failed to serialize a response to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Creates a missing parameter error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Creates an invalid parameter error.
    pub fn invalid(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }
}
