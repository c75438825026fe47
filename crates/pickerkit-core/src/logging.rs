//! Log output for binaries built on pickerkit.
//!
//! The library crates only emit `tracing` events. A binary installs a
//! subscriber once with [`init_logging`]; all output goes to stderr so
//! command output on stdout stays clean.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

/// Errors from [`init_logging`].
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install log subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Shape of each log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, for reading in a terminal.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
    /// One JSON object per event, including span timings.
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown log format '{}' (expected pretty, compact or json)",
                other
            )),
        }
    }
}

/// How [`init_logging`] sets up the subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Level for the pickerkit crates when neither `filter` nor `RUST_LOG` is set.
    pub level: Level,
    pub format: LogFormat,
    /// Filter directives such as `pickerkit_server=trace`; wins over `RUST_LOG`.
    pub filter: Option<String>,
    /// Print the file and line of each event.
    pub source_location: bool,
    /// Prefix compact and pretty lines with a timestamp. JSON lines always
    /// carry one.
    pub timestamps: bool,
}

impl LogSettings {
    /// Warnings only, one line each.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            filter: None,
            source_location: false,
            timestamps: false,
        }
    }

    /// Everything down to debug, with source locations.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: Level::DEBUG,
            source_location: true,
            ..Self::quiet()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Some(filter) = &self.filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(crate_directives(self.level))))
    }

    fn output_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        let location = self.source_location;
        let base = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        match self.format {
            LogFormat::Json => base
                .json()
                .with_file(location)
                .with_line_number(location)
                .with_span_events(FmtSpan::CLOSE)
                .boxed(),
            LogFormat::Pretty if self.timestamps => base
                .pretty()
                .with_file(location)
                .with_line_number(location)
                .boxed(),
            LogFormat::Pretty => base
                .pretty()
                .with_file(location)
                .with_line_number(location)
                .without_time()
                .boxed(),
            LogFormat::Compact if self.timestamps => base
                .compact()
                .with_file(location)
                .with_line_number(location)
                .boxed(),
            LogFormat::Compact => base
                .compact()
                .with_file(location)
                .with_line_number(location)
                .without_time()
                .boxed(),
        }
    }
}

const CRATE_TARGETS: &[&str] = &[
    "pickerkit_core",
    "pickerkit_protocol",
    "pickerkit_render",
    "pickerkit_server",
    "pickerkit_client",
];

fn crate_directives(level: Level) -> String {
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a subscriber is
/// already installed.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let filter = settings.env_filter()?;
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(settings.output_layer());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
