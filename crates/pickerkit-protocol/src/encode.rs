//! JSON encoding of date metadata.

use chrono::Locale;
use indexmap::IndexMap;
use pickerkit_core::{DateMetadataModel, DatePattern, DateValue};
use tracing::debug;

use crate::types::DateMetadataResponse;

/// Encodes every entry of `model` keyed by its date formatted with `pattern`.
///
/// Keys keep the model's insertion order. Two days that format to the same
/// text (a pattern without a day field, say) collapse into the later one.
pub fn encode_date_metadata(
    model: &dyn DateMetadataModel,
    pattern: &DatePattern,
    locale: Locale,
) -> DateMetadataResponse {
    let mut date_metadata = IndexMap::with_capacity(model.entries().len());
    for (date, metadata) in model.entries() {
        let key = pattern.format(&DateValue::Date(*date), locale);
        date_metadata.insert(key, metadata.clone());
    }
    debug!(
        count = date_metadata.len(),
        pattern = %pattern,
        "Encoded date metadata"
    );
    DateMetadataResponse { date_metadata }
}
