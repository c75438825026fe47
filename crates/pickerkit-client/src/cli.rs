//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pickerkit_core::{LogFormat, SelectionMode};

/// pickerkit - Date picker conversion and rendering
#[derive(Debug, Parser)]
#[command(name = "pickerkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "PICKERKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log format on stderr: pretty, compact or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Log filter directives, e.g. pickerkit_server=trace
    #[arg(long, global = true)]
    pub log_filter: Option<String>,

    // --- Picker overrides ---
    /// Date pattern, e.g. dd/MM/yyyy
    #[arg(long, global = true)]
    pub pattern: Option<String>,

    /// Locale name, e.g. fr_FR
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Selection mode: single, multiple or range
    #[arg(long, global = true)]
    pub mode: Option<SelectionMode>,

    /// Number of months shown at once
    #[arg(long, global = true)]
    pub months: Option<u32>,

    /// Metadata file with [[dates]] entries
    #[arg(long, global = true)]
    pub metadata: Option<PathBuf>,

    /// Load metadata per visible window
    #[arg(long, global = true)]
    pub lazy: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert submitted text into a selection
    Convert {
        /// Text as submitted by the widget
        text: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Render the picker markup and script
    Render {
        /// Client id of the picker
        #[arg(long, default_value = "dp")]
        id: String,

        /// Submitted text to render the picker with
        #[arg(long)]
        value: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Answer a view change with the metadata of the visible window
    ViewChange {
        /// Client id of the picker
        #[arg(long, default_value = "dp")]
        id: String,

        /// Visible year
        year: i32,

        /// Visible month, 0 for January
        month: u32,
    },

    /// Handle a raw form-encoded request body
    Request {
        /// Client id of the picker
        #[arg(long, default_value = "dp")]
        id: String,

        /// Body such as source=dp&behaviorEvent=viewChange&dp_year=2024&dp_month=1
        body: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration as TOML
    Dump,
    /// Validate the configuration file
    Validate,
    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pickerkit",
            "convert",
            "01/02/2024-05/02/2024",
            "--mode",
            "range",
            "--pattern",
            "dd/MM/yyyy",
        ])
        .unwrap();
        assert_eq!(cli.mode, Some(SelectionMode::Range));
        assert_eq!(cli.pattern.as_deref(), Some("dd/MM/yyyy"));
        assert!(matches!(cli.command, Command::Convert { json: false, .. }));
    }

    #[test]
    fn parse_view_change() {
        let cli = Cli::try_parse_from(["pickerkit", "view-change", "2024", "1", "--id", "form:dp"])
            .unwrap();
        let Command::ViewChange { id, year, month } = cli.command else {
            panic!("expected view-change");
        };
        assert_eq!((id.as_str(), year, month), ("form:dp", 2024, 1));
    }

    #[test]
    fn parse_log_options() {
        let cli = Cli::try_parse_from([
            "pickerkit",
            "render",
            "--log-format",
            "json",
            "--log-filter",
            "pickerkit_render=debug",
        ])
        .unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.log_filter.as_deref(), Some("pickerkit_render=debug"));
        assert!(Cli::try_parse_from(["pickerkit", "--log-format", "xml", "config", "path"]).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["pickerkit", "--mode", "week", "config", "path"]).is_err());
    }
}
