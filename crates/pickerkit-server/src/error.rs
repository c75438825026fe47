//! Server error types.

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while handling picker requests.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Request parameters could not be decoded.
    #[error("Protocol error: {0}")]
    Protocol(#[from] pickerkit_protocol::ProtocolError),

    /// The picker configuration is invalid or rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] pickerkit_render::RenderError),

    /// Submitted text could not be converted.
    #[error("Conversion error: {0}")]
    Convert(#[from] pickerkit_core::ConvertError),

    /// The metadata source failed.
    #[error("Metadata error: {0}")]
    Metadata(#[from] pickerkit_core::MetadataError),

    /// No picker is registered under the key.
    #[error("Unknown component {client_id} in session {session_id}")]
    UnknownComponent {
        session_id: String,
        client_id: String,
    },

    /// A view change was requested for a picker without a lazy model.
    #[error("Component {client_id} has no lazy metadata model")]
    NotLazy { client_id: String },
}

impl ServerError {
    /// Creates an unknown component error.
    pub fn unknown_component(session_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self::UnknownComponent {
            session_id: session_id.into(),
            client_id: client_id.into(),
        }
    }

    /// Creates a not lazy error.
    pub fn not_lazy(client_id: impl Into<String>) -> Self {
        Self::NotLazy {
            client_id: client_id.into(),
        }
    }
}
