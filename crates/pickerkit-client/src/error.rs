//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Metadata file error.
    Metadata(String),
    /// IO error.
    Io(std::io::Error),
    /// Submitted text could not be converted.
    Convert(String),
    /// Rendering failed.
    Render(String),
    /// Request handling failed.
    Request(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Metadata(msg) => write!(f, "metadata error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Convert(msg) => write!(f, "conversion failed: {}", msg),
            Self::Render(msg) => write!(f, "render failed: {}", msg),
            Self::Request(msg) => write!(f, "request failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<pickerkit_core::ConvertError> for ClientError {
    fn from(err: pickerkit_core::ConvertError) -> Self {
        Self::Convert(err.to_string())
    }
}

impl From<pickerkit_render::RenderError> for ClientError {
    fn from(err: pickerkit_render::RenderError) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<pickerkit_server::ServerError> for ClientError {
    fn from(err: pickerkit_server::ServerError) -> Self {
        match err {
            pickerkit_server::ServerError::Convert(e) => Self::Convert(e.to_string()),
            pickerkit_server::ServerError::Render(e) => Self::Render(e.to_string()),
            other => Self::Request(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Request(format!("failed to serialize output: {}", err))
    }
}

impl From<pickerkit_protocol::ProtocolError> for ClientError {
    fn from(err: pickerkit_protocol::ProtocolError) -> Self {
        Self::Request(err.to_string())
    }
}
