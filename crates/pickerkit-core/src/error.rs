//! Error types for pattern compilation and value conversion.

use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors raised while compiling a date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("empty date pattern")]
    Empty,

    /// The pattern uses a letter that has no field mapping.
    #[error("unsupported pattern letter '{letter}' at position {position} in {pattern:?}")]
    UnsupportedLetter {
        pattern: String,
        letter: char,
        position: usize,
    },

    /// A quoted literal was opened but never closed.
    #[error("unterminated quoted literal in {pattern:?}")]
    UnterminatedQuote { pattern: String },

    /// The pattern contains only literal text.
    #[error("pattern {pattern:?} has no date or time fields")]
    NoFields { pattern: String },

    /// The pattern contains a textual field that an input mask cannot express.
    #[error("pattern {pattern:?} cannot be masked: textual field '{field}'")]
    NotMaskable { pattern: String, field: String },
}

/// Errors raised while converting submitted text into date values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The text does not match the active pattern.
    #[error("{text:?} does not match pattern {pattern:?}: {source}")]
    Parse {
        text: String,
        pattern: String,
        #[source]
        source: chrono::format::ParseError,
    },

    /// The range start falls after its adjusted end.
    #[error("range start {start} is after range end {end}")]
    ReversedRange { start: String, end: String },

    /// The pattern itself is invalid.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl ConvertError {
    /// Creates a parse error for the given text and pattern.
    pub fn parse(
        text: impl Into<String>,
        pattern: impl Into<String>,
        source: chrono::format::ParseError,
    ) -> Self {
        Self::Parse {
            text: text.into(),
            pattern: pattern.into(),
            source,
        }
    }
}
