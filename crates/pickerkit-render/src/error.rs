//! Render error types.

use pickerkit_core::{PatternError, SelectionMode};
use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while configuring or rendering a picker.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The picker configuration is inconsistent.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The date pattern cannot be compiled or masked.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Input masking is not available for the selection mode.
    #[error("mask is not supported with selection mode {mode}")]
    UnsupportedMask { mode: SelectionMode },

    /// The locale name is not known.
    #[error("unknown locale: {name}")]
    UnknownLocale { name: String },
}

impl RenderError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
