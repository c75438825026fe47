//! Convert command.

use pickerkit_core::Selection;
use pickerkit_render::DatePickerRenderer;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Converts `text` with the configured picker.
///
/// Plain output lists one value per line in ISO form.
pub fn convert(config: &ClientConfig, text: &str, json: bool) -> ClientResult<String> {
    let renderer = DatePickerRenderer::new(&config.picker)?;
    let selection = renderer.convert(text)?;
    if json {
        return Ok(serde_json::to_string_pretty(&selection)?);
    }
    Ok(plain(&selection))
}

fn plain(selection: &Selection) -> String {
    if selection.is_empty() {
        return "(empty)".to_string();
    }
    selection
        .values()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
