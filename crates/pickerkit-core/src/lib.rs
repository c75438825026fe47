//! Core types: date patterns, values, selections, date metadata

pub mod error;
pub mod logging;
pub mod metadata;
pub mod pattern;
pub mod selection;
pub mod value;
pub mod window;

pub use error::{ConvertError, ConvertResult, PatternError};
pub use logging::{LogFormat, LogSettings, LoggingError, init_logging};
pub use metadata::{
    DateMetadata, DateMetadataModel, EagerDateMetadataModel, LazyDateMetadataModel,
    MetadataEntries, MetadataError, MetadataSource,
};
pub use pattern::{DatePattern, parse_locale};
pub use selection::{
    ConvertOptions, DEFAULT_RANGE_SEPARATOR, MULTIPLE_SEPARATOR, Selection, SelectionMode, convert,
    split_range,
};
pub use value::{DateValue, TemporalKind};
pub use window::DateWindow;

/// Re-exported so callers can name locales without depending on chrono directly.
pub use chrono::Locale;
