//! Request parameters and JSON wire types for picker requests.
//!
//! The client runtime talks to the server with plain form parameters and
//! expects JSON back. This crate decodes the parameters of a
//! [`ViewChangeRequest`] and encodes the per-date metadata response:
//!
//! ```json
//! {"dateMetadata": {"2024-01-10": {"disabled": true, "styleClass": null}}}
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pickerkit_core::{DateMetadata, DatePattern, EagerDateMetadataModel, Locale};
//! use pickerkit_protocol::encode_date_metadata;
//!
//! let model = EagerDateMetadataModel::new().with(
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!     DateMetadata::disabled(),
//! );
//! let pattern = DatePattern::new("yyyy-MM-dd").unwrap();
//! let response = encode_date_metadata(&model, &pattern, Locale::POSIX);
//! assert_eq!(
//!     response.to_json().unwrap(),
//!     r#"{"dateMetadata":{"2024-01-10":{"disabled":true,"styleClass":null}}}"#
//! );
//! ```

mod encode;
mod error;
mod types;

pub use encode::encode_date_metadata;
pub use error::{ProtocolError, ProtocolResult};
pub use types::{
    BEHAVIOR_EVENT_PARAM, DateMetadataResponse, RequestParams, SOURCE_PARAM, VIEW_CHANGE_EVENT,
    ViewChangeRequest,
};

/// Suffix of the parameter carrying the submitted input text.
pub const INPUT_SUFFIX: &str = "_input";

/// Suffix of the parameter carrying the visible year.
pub const YEAR_SUFFIX: &str = "_year";

/// Suffix of the parameter carrying the zero-based visible month.
pub const MONTH_SUFFIX: &str = "_month";
