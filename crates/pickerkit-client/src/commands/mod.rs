//! Subcommand implementations.
//!
//! Each command returns its output so `main` decides where it goes.

pub mod config;
pub mod convert;
pub mod render;
pub mod request;
pub mod view_change;

use pickerkit_server::RequestHandler;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::metadata::MetadataFile;

/// Session id used for every picker the CLI opens.
pub const SESSION_ID: &str = "cli";

/// Opens a handler with a single picker for `client_id`.
///
/// The picker's model comes from the configured metadata file, if any.
pub fn open_handler(config: &ClientConfig, client_id: &str) -> ClientResult<RequestHandler> {
    let model = match &config.metadata.file {
        Some(path) => {
            debug!(path = %path.display(), lazy = config.metadata.lazy, "Loading metadata file");
            Some(MetadataFile::load(path)?.into_model(config.metadata.lazy))
        }
        None => None,
    };

    let mut handler = RequestHandler::new();
    handler
        .sessions_mut()
        .open(SESSION_ID, client_id, config.picker.clone(), model)?;
    Ok(handler)
}
