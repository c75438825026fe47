//! Configuration file support for the pickerkit client.

use std::path::{Path, PathBuf};

use pickerkit_core::{LogFormat, LogSettings};
use pickerkit_render::{HostComponent, PickerConfig, resolve_mask};
use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Enable debug logging.
    pub debug: bool,
    /// Log output overrides.
    pub log: LogOptions,
    /// Picker used by every command.
    pub picker: PickerConfig,
    /// Where per-day metadata comes from.
    pub metadata: MetadataSettings,
}

/// Metadata file settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// TOML file with `[[dates]]` entries.
    pub file: Option<PathBuf>,
    /// Load the file per visible window instead of up front.
    pub lazy: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// `pretty`, `compact` or `json`.
    pub format: Option<LogFormat>,
    /// Filter directives, e.g. `pickerkit_server=trace`.
    pub filter: Option<String>,
}

impl ClientConfig {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self, String> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config file {}: {}", path.display(), e))?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| format!("failed to parse config file {}: {}", path.display(), e))?;

        // Relative metadata files are relative to the config file.
        if let Some(file) = &config.metadata.file
            && file.is_relative()
            && let Some(dir) = path.parent()
        {
            config.metadata.file = Some(dir.join(file));
        }
        Ok(config)
    }

    /// Get the default configuration file path.
    ///
    /// `~/.config/pickerkit/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pickerkit").join("config.toml"))
    }

    /// Log settings for this configuration.
    pub fn log_settings(&self) -> LogSettings {
        let mut settings = if self.debug {
            LogSettings::debug()
        } else {
            LogSettings::quiet()
        };
        if let Some(format) = self.log.format {
            settings = settings.with_format(format);
        }
        if let Some(filter) = &self.log.filter {
            settings = settings.with_filter(filter.clone());
        }
        settings
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.picker.validate().map_err(|e| e.to_string())?;
        let pattern = self
            .picker
            .calculate_widget_pattern()
            .map_err(|e| e.to_string())?;
        resolve_mask(&self.picker, &pattern).map_err(|e| e.to_string())?;
        if let Some(file) = &self.metadata.file
            && !file.exists()
        {
            return Err(format!("metadata file not found: {}", file.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickerkit_core::SelectionMode;
    use pickerkit_render::MaskSetting;
    use std::io::Write;

    #[test]
    fn empty_file_is_default() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.picker.locale, "en_US");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
debug = true

[picker]
pattern = "dd/MM/yyyy"
selection_mode = "range"
number_of_months = 2
mask = true

[metadata]
file = "dates.toml"
lazy = true
"#
        )
        .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert!(config.debug);
        assert_eq!(config.picker.pattern.as_deref(), Some("dd/MM/yyyy"));
        assert_eq!(config.picker.selection_mode, SelectionMode::Range);
        assert_eq!(config.picker.number_of_months, 2);
        assert_eq!(config.picker.mask, MaskSetting::FromPattern);
        assert_eq!(config.metadata.file, Some(dir.path().join("dates.toml")));
        assert!(config.metadata.lazy);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[picker\n").unwrap();
        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(err.starts_with("failed to parse config file"));
    }

    #[test]
    fn validate_checks_picker_and_metadata() {
        let mut config = ClientConfig::default();
        assert!(config.validate().is_ok());

        config.metadata.file = Some(PathBuf::from("/nonexistent/dates.toml"));
        assert_eq!(
            config.validate().unwrap_err(),
            "metadata file not found: /nonexistent/dates.toml"
        );

        config.metadata.file = None;
        config.picker.number_of_months = 0;
        assert!(config.validate().is_err());

        config.picker.number_of_months = 1;
        config.picker.selection_mode = SelectionMode::Multiple;
        config.picker.mask = MaskSetting::FromPattern;
        assert_eq!(
            config.validate().unwrap_err(),
            "mask is not supported with selection mode multiple"
        );
    }

    #[test]
    fn log_settings_follow_config() {
        let config = ClientConfig::default();
        assert_eq!(config.log_settings(), LogSettings::quiet());

        let config: ClientConfig = toml::from_str(
            r#"
debug = true

[log]
format = "json"
filter = "pickerkit_server=trace"
"#,
        )
        .unwrap();
        let settings = config.log_settings();
        assert_eq!(settings.format, LogFormat::Json);
        assert_eq!(settings.filter.as_deref(), Some("pickerkit_server=trace"));
        assert!(settings.source_location);

        assert!(toml::from_str::<ClientConfig>("[log]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn dump_round_trips() {
        let config = ClientConfig {
            picker: PickerConfig::default().with_mask(MaskSetting::Custom("99/99/9999".into())),
            ..ClientConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
