//! pickerkit CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use pickerkit_client::cli::{Cli, Command, ConfigAction};
use pickerkit_client::commands;
use pickerkit_client::config::ClientConfig;
use pickerkit_client::error::{ClientError, ClientResult};
use pickerkit_core::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.log_settings()) {
        eprintln!("warning: {}", e);
    }

    match run(cli, &config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    let mut config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };
    apply_overrides(cli, &mut config);
    Ok(config)
}

fn run(cli: Cli, config: &ClientConfig) -> ClientResult<String> {
    match cli.command {
        Command::Convert { text, json } => commands::convert::convert(config, &text, json),
        Command::Render { id, value, json } => {
            commands::render::render(config, &id, value.as_deref(), json)
        }
        Command::ViewChange { id, year, month } => {
            commands::view_change::view_change(config, &id, year, month)
        }
        Command::Request { id, body } => commands::request::request(config, &id, &body),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(config),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}

// Command-line flags win over the configuration file.
fn apply_overrides(cli: &Cli, config: &mut ClientConfig) {
    if cli.debug {
        config.debug = true;
    }
    if let Some(format) = cli.log_format {
        config.log.format = Some(format);
    }
    if let Some(ref filter) = cli.log_filter {
        config.log.filter = Some(filter.clone());
    }
    if let Some(ref pattern) = cli.pattern {
        config.picker.pattern = Some(pattern.clone());
    }
    if let Some(ref locale) = cli.locale {
        config.picker.locale = locale.clone();
    }
    if let Some(mode) = cli.mode {
        config.picker.selection_mode = mode;
    }
    if let Some(months) = cli.months {
        config.picker.number_of_months = months;
    }
    if let Some(ref file) = cli.metadata {
        config.metadata.file = Some(file.clone());
    }
    if cli.lazy {
        config.metadata.lazy = true;
    }
}
