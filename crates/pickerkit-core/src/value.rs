//! Temporal values produced by the date picker.
//!
//! A picker is bound to one of three value kinds: a calendar date, a date
//! with a time of day, or a time of day alone. [`DateValue`] carries the
//! parsed value and [`TemporalKind`] names which kind it is.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The temporal kind a picker value is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalKind {
    /// Calendar date without a time of day.
    Date,
    /// Calendar date with a time of day.
    DateTime,
    /// Time of day without a date.
    Time,
}

impl TemporalKind {
    /// Returns the name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::Time => "time",
        }
    }

    /// Returns `true` if values of this kind carry a time of day.
    pub fn has_time(&self) -> bool {
        matches!(self, Self::DateTime | Self::Time)
    }

    /// Returns `true` if values of this kind carry a calendar date.
    pub fn has_date(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date used to anchor time-only values when a full date-time is needed.
pub fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date")
}

/// The last representable instant of a calendar day.
pub fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).expect("valid time")
}

/// A parsed picker value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DateValue {
    /// A calendar date.
    Date(NaiveDate),
    /// A calendar date with a time of day.
    DateTime(NaiveDateTime),
    /// A time of day.
    Time(NaiveTime),
}

impl DateValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> TemporalKind {
        match self {
            Self::Date(_) => TemporalKind::Date,
            Self::DateTime(_) => TemporalKind::DateTime,
            Self::Time(_) => TemporalKind::Time,
        }
    }

    /// Returns the calendar date, if this value has one.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date()),
            Self::Time(_) => None,
        }
    }

    /// Returns the time of day, if this value has one.
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => Some(dt.time()),
            Self::Time(t) => Some(*t),
        }
    }

    /// Converts to the canonical calendar representation.
    ///
    /// Dates land at midnight, times are anchored on 1970-01-01.
    pub fn to_naive_datetime(&self) -> NaiveDateTime {
        match self {
            Self::Date(d) => d.and_time(NaiveTime::MIN),
            Self::DateTime(dt) => *dt,
            Self::Time(t) => anchor_date().and_time(*t),
        }
    }

    /// Converts this value to another kind.
    ///
    /// Dropped components are lost; added components use midnight or the
    /// anchor date.
    pub fn coerce(self, kind: TemporalKind) -> Self {
        if self.kind() == kind {
            return self;
        }
        let canonical = self.to_naive_datetime();
        match kind {
            TemporalKind::Date => Self::Date(canonical.date()),
            TemporalKind::DateTime => Self::DateTime(canonical),
            TemporalKind::Time => Self::Time(canonical.time()),
        }
    }

    /// Moves a date-time value to the last instant of its calendar day.
    ///
    /// Date-only and time-only values are returned unchanged.
    pub fn end_of_day(self) -> Self {
        match self {
            Self::DateTime(dt) => Self::DateTime(dt.date().and_time(end_of_day_time())),
            other => other,
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveTime> for DateValue {
    fn from(time: NaiveTime) -> Self {
        Self::Time(time)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
        }
    }
}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_naive_datetime().cmp(&other.to_naive_datetime())
    }
}
