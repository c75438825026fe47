//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the effective configuration as TOML.
pub fn dump(config: &ClientConfig) -> ClientResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!("# config.toml ({})\n{}", path_display(), toml_str))
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<String> {
    config.validate().map_err(ClientError::Config)?;
    Ok("Configuration is valid.".to_string())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<String> {
    Ok(format!("config: {}", path_display()))
}

fn path_display() -> String {
    ClientConfig::default_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config directory)".to_string())
}
