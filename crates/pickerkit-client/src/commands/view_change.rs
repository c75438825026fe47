//! View change command.

use pickerkit_protocol::{
    BEHAVIOR_EVENT_PARAM, MONTH_SUFFIX, RequestParams, SOURCE_PARAM, VIEW_CHANGE_EVENT, YEAR_SUFFIX,
};

use super::{SESSION_ID, open_handler};
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Builds the parameters the widget sends when its view moves to
/// `year`/`month`, with `month` counted from 0.
pub fn view_change_params(client_id: &str, year: i32, month: u32) -> RequestParams {
    RequestParams::new()
        .with(SOURCE_PARAM, client_id)
        .with(BEHAVIOR_EVENT_PARAM, VIEW_CHANGE_EVENT)
        .with(format!("{}{}", client_id, YEAR_SUFFIX), year.to_string())
        .with(format!("{}{}", client_id, MONTH_SUFFIX), month.to_string())
}

/// Answers a view change for the picker `client_id`.
///
/// The picker needs a lazy metadata file.
pub fn view_change(
    config: &ClientConfig,
    client_id: &str,
    year: i32,
    month: u32,
) -> ClientResult<String> {
    let mut handler = open_handler(config, client_id)?;
    let params = view_change_params(client_id, year, month);
    let response = handler.handle(SESSION_ID, client_id, &params)?;
    Ok(response.body()?)
}
