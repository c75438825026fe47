//! Per-date rendering metadata.
//!
//! Each calendar day can carry a [`DateMetadata`] hint: whether the day is
//! disabled and an optional style class. Hints live in a
//! [`DateMetadataModel`], which comes in two flavours:
//!
//! - [`EagerDateMetadataModel`]: filled once when the component is built.
//! - [`LazyDateMetadataModel`]: filled per visible window from a
//!   [`MetadataSource`] every time the client navigates to another month.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::window::DateWindow;

/// Insertion-ordered metadata keyed by calendar day.
pub type MetadataEntries = IndexMap<NaiveDate, DateMetadata>;

/// Rendering hints for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateMetadata {
    /// Whether the day can be selected.
    #[serde(default)]
    pub disabled: bool,
    /// Extra CSS class for the day cell.
    #[serde(default)]
    pub style_class: Option<String>,
}

impl DateMetadata {
    /// Creates metadata with the given flags.
    pub fn new(disabled: bool, style_class: Option<String>) -> Self {
        Self {
            disabled,
            style_class,
        }
    }

    /// Metadata for a disabled day without a style class.
    pub fn disabled() -> Self {
        Self::new(true, None)
    }

    /// Metadata for an enabled day with a style class.
    pub fn styled(style_class: impl Into<String>) -> Self {
        Self::new(false, Some(style_class.into()))
    }

    /// Builder method to set the style class.
    #[must_use]
    pub fn with_style_class(mut self, style_class: impl Into<String>) -> Self {
        self.style_class = Some(style_class.into());
        self
    }
}

/// Errors raised while loading metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The metadata source failed.
    #[error("metadata fetch for {start}..={end} failed: {message}")]
    Fetch {
        start: NaiveDate,
        end: NaiveDate,
        message: String,
    },
}

impl MetadataError {
    /// Creates a fetch error for the given window.
    pub fn fetch(window: &DateWindow, message: impl Into<String>) -> Self {
        Self::Fetch {
            start: window.start,
            end: window.end,
            message: message.into(),
        }
    }
}

/// Supplies metadata for a visible window.
///
/// Implemented for closures taking the first and last visible day.
pub trait MetadataSource {
    /// Returns the metadata for days in `window`.
    ///
    /// Entries outside the window are ignored by the caller.
    fn fetch(&self, window: &DateWindow) -> Result<Vec<(NaiveDate, DateMetadata)>, MetadataError>;
}

impl<F> MetadataSource for F
where
    F: Fn(NaiveDate, NaiveDate) -> Result<Vec<(NaiveDate, DateMetadata)>, MetadataError>,
{
    fn fetch(&self, window: &DateWindow) -> Result<Vec<(NaiveDate, DateMetadata)>, MetadataError> {
        self(window.start, window.end)
    }
}

/// A store of per-day metadata.
pub trait DateMetadataModel {
    /// Returns every entry in insertion order.
    fn entries(&self) -> &MetadataEntries;

    /// Returns the metadata for a day, if any.
    fn get(&self, date: NaiveDate) -> Option<&DateMetadata> {
        self.entries().get(&date)
    }

    /// Returns `true` if entries are loaded per visible window.
    fn is_lazy(&self) -> bool {
        false
    }

    /// Drops every entry.
    fn clear(&mut self);

    /// Loads the entries for a visible window.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source fails.
    fn load_window(&mut self, window: &DateWindow) -> Result<(), MetadataError>;
}

/// A model populated once, up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EagerDateMetadataModel {
    entries: MetadataEntries,
}

impl EagerDateMetadataModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the metadata for a day.
    pub fn add(&mut self, date: NaiveDate, metadata: DateMetadata) {
        self.entries.insert(date, metadata);
    }

    /// Builder variant of [`EagerDateMetadataModel::add`].
    #[must_use]
    pub fn with(mut self, date: NaiveDate, metadata: DateMetadata) -> Self {
        self.add(date, metadata);
        self
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the model has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(NaiveDate, DateMetadata)> for EagerDateMetadataModel {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, DateMetadata)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl DateMetadataModel for EagerDateMetadataModel {
    fn entries(&self) -> &MetadataEntries {
        &self.entries
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn load_window(&mut self, _window: &DateWindow) -> Result<(), MetadataError> {
        Ok(())
    }
}

/// A model populated per visible window from a [`MetadataSource`].
pub struct LazyDateMetadataModel<S> {
    source: S,
    entries: MetadataEntries,
    window: Option<DateWindow>,
}

impl<S: MetadataSource> LazyDateMetadataModel<S> {
    /// Creates an empty model backed by `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: MetadataEntries::new(),
            window: None,
        }
    }

    /// Returns the window of the last successful load.
    pub fn loaded_window(&self) -> Option<&DateWindow> {
        self.window.as_ref()
    }
}

impl<S> std::fmt::Debug for LazyDateMetadataModel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyDateMetadataModel")
            .field("entries", &self.entries)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl<S: MetadataSource> DateMetadataModel for LazyDateMetadataModel<S> {
    fn entries(&self) -> &MetadataEntries {
        &self.entries
    }

    fn is_lazy(&self) -> bool {
        true
    }

    fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.window = None;
        debug!(count, "Cleared date metadata");
    }

    fn load_window(&mut self, window: &DateWindow) -> Result<(), MetadataError> {
        // stale days from an earlier window never survive a load
        self.entries.retain(|date, _| window.contains(*date));

        let fetched = match self.source.fetch(window) {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(start = %window.start, end = %window.end, error = %e, "Metadata fetch failed");
                self.entries.clear();
                self.window = None;
                return Err(e);
            }
        };

        let mut outside = 0usize;
        for (date, metadata) in fetched {
            if window.contains(date) {
                self.entries.insert(date, metadata);
            } else {
                outside += 1;
            }
        }
        if outside > 0 {
            debug!(outside, "Dropped metadata outside the visible window");
        }

        self.window = Some(*window);
        debug!(
            start = %window.start,
            end = %window.end,
            count = self.entries.len(),
            "Loaded date metadata"
        );
        Ok(())
    }
}
