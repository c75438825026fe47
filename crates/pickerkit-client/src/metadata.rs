//! Per-day metadata loaded from a TOML file.
//!
//! ```toml
//! [[dates]]
//! date = "2024-12-25"
//! disabled = true
//! style_class = "holiday"
//! ```

use std::path::Path;

use chrono::NaiveDate;
use pickerkit_core::{
    DateMetadata, DateMetadataModel, EagerDateMetadataModel, LazyDateMetadataModel, MetadataError,
};
use pickerkit_server::BoxedModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// One `[[dates]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub style_class: Option<String>,
}

impl DateEntry {
    fn into_pair(self) -> (NaiveDate, DateMetadata) {
        (self.date, DateMetadata::new(self.disabled, self.style_class))
    }
}

/// Contents of a metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFile {
    #[serde(default)]
    pub dates: Vec<DateEntry>,
}

impl MetadataFile {
    /// Reads and parses a metadata file.
    pub fn load(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Metadata(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| ClientError::Metadata(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Parses metadata from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Builds a model holding every entry.
    pub fn into_eager(self) -> EagerDateMetadataModel {
        self.dates.into_iter().map(DateEntry::into_pair).collect()
    }

    /// Builds a model that serves entries per visible window.
    pub fn into_lazy(self) -> impl DateMetadataModel + 'static {
        let entries: Vec<(NaiveDate, DateMetadata)> =
            self.dates.into_iter().map(DateEntry::into_pair).collect();
        LazyDateMetadataModel::new(
            move |start: NaiveDate,
                  end: NaiveDate|
                  -> Result<Vec<(NaiveDate, DateMetadata)>, MetadataError> {
                let window: Vec<_> = entries
                    .iter()
                    .filter(|(date, _)| (start..=end).contains(date))
                    .cloned()
                    .collect();
                debug!(%start, %end, count = window.len(), "Serving metadata from file");
                Ok(window)
            },
        )
    }

    /// Builds the model requested by the configuration.
    pub fn into_model(self, lazy: bool) -> BoxedModel {
        if lazy {
            Box::new(self.into_lazy())
        } else {
            Box::new(self.into_eager())
        }
    }
}
