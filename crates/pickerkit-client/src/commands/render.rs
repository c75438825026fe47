//! Render command.

use pickerkit_protocol::{INPUT_SUFFIX, RequestParams};

use super::{SESSION_ID, open_handler};
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Renders the picker `client_id`, optionally after submitting `value`.
///
/// Text that does not convert is rendered back as submitted.
pub fn render(
    config: &ClientConfig,
    client_id: &str,
    value: Option<&str>,
    json: bool,
) -> ClientResult<String> {
    let mut handler = open_handler(config, client_id)?;
    let mut params = RequestParams::new();
    if let Some(value) = value {
        params.insert(format!("{}{}", client_id, INPUT_SUFFIX), value);
    }

    let response = handler.handle(SESSION_ID, client_id, &params)?;
    if json {
        return Ok(serde_json::to_string_pretty(&response)?);
    }
    Ok(response.body()?)
}
