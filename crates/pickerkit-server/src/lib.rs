//! Per-session picker state and request handling.
//!
//! This crate keeps the state of every rendered picker between requests
//! and answers the requests the client runtime sends:
//! - view changes, answered with the JSON metadata of the visible window
//! - submissions, converted to typed values
//! - renders, answered with the picker markup and script
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pickerkit_core::{DateMetadata, LazyDateMetadataModel, MetadataError};
//! use pickerkit_protocol::RequestParams;
//! use pickerkit_render::PickerConfig;
//! use pickerkit_server::{PickerResponse, RequestHandler};
//!
//! let source = |start: NaiveDate,
//!               _end: NaiveDate|
//!  -> Result<Vec<(NaiveDate, DateMetadata)>, MetadataError> {
//!     Ok(vec![(start, DateMetadata::disabled())])
//! };
//! let mut handler = RequestHandler::new();
//! handler
//!     .sessions_mut()
//!     .open(
//!         "session-1",
//!         "dp",
//!         PickerConfig::default().with_pattern("yyyy-MM-dd"),
//!         Some(Box::new(LazyDateMetadataModel::new(source))),
//!     )
//!     .unwrap();
//!
//! let params = RequestParams::from_form_urlencoded(
//!     "source=dp&behaviorEvent=viewChange&dp_year=2024&dp_month=0",
//! )
//! .unwrap();
//! let response = handler.handle("session-1", "dp", &params).unwrap();
//! assert!(matches!(response, PickerResponse::Metadata(_)));
//! assert_eq!(
//!     response.body().unwrap(),
//!     r#"{"dateMetadata":{"2024-01-01":{"disabled":true,"styleClass":null}}}"#
//! );
//! ```

mod error;
mod handler;
mod session;

pub use error::{ServerError, ServerResult};
pub use handler::{PickerResponse, RequestHandler};
pub use session::{BoxedModel, PickerSession, SessionKey, SessionRegistry, WindowState};
