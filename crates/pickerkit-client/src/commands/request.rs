//! Raw request command.

use pickerkit_protocol::RequestParams;

use super::{SESSION_ID, open_handler};
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Handles a form-encoded request body for the picker `client_id`.
pub fn request(config: &ClientConfig, client_id: &str, body: &str) -> ClientResult<String> {
    let params = RequestParams::from_form_urlencoded(body)?;
    let mut handler = open_handler(config, client_id)?;
    let response = handler.handle(SESSION_ID, client_id, &params)?;
    Ok(response.body()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::lazy_config;

    #[test]
    fn view_change_body() {
        let dir = tempfile::tempdir().unwrap();
        let out = request(
            &lazy_config(dir.path()),
            "form:dp",
            "source=form%3Adp&behaviorEvent=viewChange&form%3Adp_year=2024&form%3Adp_month=3",
        )
        .unwrap();
        assert_eq!(
            out,
            r#"{"dateMetadata":{"01/04/2024":{"disabled":true,"styleClass":null}}}"#
        );
    }

    #[test]
    fn submission_body() {
        let dir = tempfile::tempdir().unwrap();
        let out = request(&lazy_config(dir.path()), "dp", "dp_input=01%2F03%2F2024").unwrap();
        assert!(out.contains(r#"value="01/03/2024""#));
    }

    #[test]
    fn missing_month_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = request(
            &lazy_config(dir.path()),
            "dp",
            "source=dp&behaviorEvent=viewChange&dp_year=2024",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("request failed:"));
    }
}
