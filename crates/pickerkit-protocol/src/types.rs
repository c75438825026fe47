//! Request and response types for picker requests.

use std::collections::HashMap;

use indexmap::IndexMap;
use pickerkit_core::{DateMetadata, DateWindow};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ProtocolError, ProtocolResult};
use crate::{INPUT_SUFFIX, MONTH_SUFFIX, YEAR_SUFFIX};

/// Parameter naming the component that triggered a request.
pub const SOURCE_PARAM: &str = "source";

/// Parameter naming the client behavior event of a request.
pub const BEHAVIOR_EVENT_PARAM: &str = "behaviorEvent";

/// Behavior event sent when the client navigates to other months.
pub const VIEW_CHANGE_EVENT: &str = "viewChange";

/// Decoded request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    params: HashMap<String, String>,
}

impl RequestParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// `+` stands for a space. When a name repeats, the last value wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a name or value is not valid UTF-8 once decoded.
    pub fn from_form_urlencoded(body: &str) -> ProtocolResult<Self> {
        let mut params = HashMap::new();
        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = urlencoding::decode(&name.replace('+', " "))?.into_owned();
            let value = urlencoding::decode(&value.replace('+', " "))?.into_owned();
            params.insert(name, value);
        }
        trace!(count = params.len(), "Decoded form parameters");
        Ok(Self { params })
    }

    /// Builder method to add a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Returns a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns a required parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingParameter`] if it is absent.
    pub fn require(&self, name: &str) -> ProtocolResult<&str> {
        self.get(name).ok_or_else(|| ProtocolError::missing(name))
    }

    /// Returns `true` if the request was triggered by `client_id` with the
    /// given behavior event.
    pub fn is_request_source(&self, client_id: &str, event: &str) -> bool {
        self.get(SOURCE_PARAM) == Some(client_id) && self.get(BEHAVIOR_EVENT_PARAM) == Some(event)
    }

    /// Returns the submitted input text of a component.
    pub fn submitted_value(&self, client_id: &str) -> Option<&str> {
        self.get(&format!("{}{}", client_id, INPUT_SUFFIX))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A client request to show other months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewChangeRequest {
    /// Year of the first visible month.
    pub year: i32,
    /// Zero-based first visible month (January is 0).
    pub month: u32,
}

impl ViewChangeRequest {
    /// Creates a request for the given year and zero-based month.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Reads `<client_id>_year` and `<client_id>_month` from the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is missing or not an integer.
    pub fn from_params(client_id: &str, params: &RequestParams) -> ProtocolResult<Self> {
        let year_name = format!("{}{}", client_id, YEAR_SUFFIX);
        let month_name = format!("{}{}", client_id, MONTH_SUFFIX);

        let year_text = params.require(&year_name)?;
        let year = year_text
            .trim()
            .parse::<i32>()
            .map_err(|_| ProtocolError::invalid(&year_name, year_text))?;

        let month_text = params.require(&month_name)?;
        let month = month_text
            .trim()
            .parse::<u32>()
            .map_err(|_| ProtocolError::invalid(&month_name, month_text))?;

        Ok(Self { year, month })
    }

    /// Returns the window covering `months` visible months.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidWindow`] for a month outside 0-11,
    /// zero months, or a year out of range.
    pub fn window(&self, months: u32) -> ProtocolResult<DateWindow> {
        DateWindow::from_month(self.year, self.month, months).ok_or(ProtocolError::InvalidWindow {
            year: self.year,
            month: self.month,
            months,
        })
    }
}

/// Response to a view change: metadata keyed by formatted date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMetadataResponse {
    /// Metadata in model insertion order.
    #[serde(rename = "dateMetadata")]
    pub date_metadata: IndexMap<String, DateMetadata>,
}

impl DateMetadataResponse {
    /// Returns the number of encoded days.
    pub fn len(&self) -> usize {
        self.date_metadata.len()
    }

    /// Returns `true` if no day was encoded.
    pub fn is_empty(&self) -> bool {
        self.date_metadata.is_empty()
    }

    /// Serializes the response to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
