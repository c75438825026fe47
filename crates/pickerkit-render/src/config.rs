//! Date picker configuration.
//!
//! [`PickerConfig`] holds every option a picker can be rendered with. It is
//! serde-(de)serializable with `#[serde(default)]`, so a configuration file
//! only needs the options that differ from the defaults.

use chrono::NaiveDate;
use pickerkit_core::{
    ConvertOptions, DEFAULT_RANGE_SEPARATOR, DatePattern, Locale, SelectionMode, TemporalKind,
    parse_locale,
};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::widget::DEFAULT_RUNTIME;

/// Pattern used for date values when none is configured.
pub const DEFAULT_DATE_PATTERN: &str = "MM/dd/yyyy";

/// Pattern used for date-time values when none is configured.
pub const DEFAULT_DATE_TIME_PATTERN: &str = "MM/dd/yyyy HH:mm";

/// Pattern used for time values when none is configured.
pub const DEFAULT_TIME_PATTERN: &str = "HH:mm";

/// Clock used by the time picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HourFormat {
    #[serde(rename = "12")]
    H12,
    #[serde(rename = "24")]
    H24,
}

impl HourFormat {
    /// Returns the value sent to the widget.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H12 => "12",
            Self::H24 => "24",
        }
    }
}

/// Input masking.
///
/// In configuration files this is `false`, `true`, or a literal mask such
/// as `"99/99/9999"`. The strings `"true"` and `"false"` mean the same as
/// the booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMask", into = "RawMask")]
pub enum MaskSetting {
    /// No mask.
    #[default]
    Disabled,
    /// Mask derived from the date pattern.
    FromPattern,
    /// Mask used verbatim.
    Custom(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawMask {
    Flag(bool),
    Text(String),
}

impl From<RawMask> for MaskSetting {
    fn from(raw: RawMask) -> Self {
        match raw {
            RawMask::Flag(false) => Self::Disabled,
            RawMask::Flag(true) => Self::FromPattern,
            RawMask::Text(text) => match text.as_str() {
                "false" => Self::Disabled,
                "true" => Self::FromPattern,
                _ => Self::Custom(text),
            },
        }
    }
}

impl From<MaskSetting> for RawMask {
    fn from(mask: MaskSetting) -> Self {
        match mask {
            MaskSetting::Disabled => Self::Flag(false),
            MaskSetting::FromPattern => Self::Flag(true),
            MaskSetting::Custom(text) => Self::Text(text),
        }
    }
}

/// What the rendering side needs to know about the component hosting a
/// picker.
pub trait HostComponent {
    /// Number of months shown at once.
    fn number_of_months(&self) -> u32;

    /// Pattern used for text exchanged with the widget.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern does not compile.
    fn calculate_widget_pattern(&self) -> RenderResult<DatePattern>;
}

/// Configuration of a date picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Date pattern; derived from the value kind when unset.
    pub pattern: Option<String>,
    /// Kind of the bound value, when known.
    pub value_kind: Option<TemporalKind>,
    pub selection_mode: SelectionMode,
    pub range_separator: String,
    pub time_separator: String,
    pub number_of_months: u32,
    /// Locale name such as `en_US` or `fr-FR`.
    pub locale: String,

    pub inline: bool,
    pub show_icon: bool,
    pub disabled: bool,
    pub style: Option<String>,
    pub style_class: Option<String>,
    pub placeholder: Option<String>,
    /// Years offered by the year navigator, e.g. `2000:2030`.
    pub year_range: Option<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,

    pub month_navigator: bool,
    pub year_navigator: bool,
    pub show_button_bar: bool,
    pub show_week: bool,
    pub show_other_months: bool,
    pub select_other_months: bool,
    pub touch_ui: bool,
    /// `date` or `month`.
    pub view: Option<String>,
    /// Days of the week that cannot be selected, 0 for Sunday.
    pub disabled_days: Vec<u32>,
    pub focus_on_select: bool,
    pub show_on_focus: bool,
    /// Cutoff for two-digit years, e.g. `+10`.
    pub short_year_cutoff: Option<String>,
    pub show_min_max_range: bool,
    pub auto_month_format: bool,
    pub panel_style: Option<String>,
    pub panel_style_class: Option<String>,
    /// Keep text the widget cannot parse instead of clearing it.
    pub keep_invalid: bool,
    /// Upper bound on picked dates in multiple mode; unbounded when unset.
    pub max_date_count: Option<u32>,

    /// Client-side functions, passed to the widget as code.
    pub date_template: Option<String>,
    pub before_show: Option<String>,
    pub on_month_change: Option<String>,
    pub on_year_change: Option<String>,
    pub week_calculator: Option<String>,

    /// Time display; inferred from the value kind and pattern when unset.
    pub show_time: Option<bool>,
    pub time_only: Option<bool>,
    pub show_seconds: Option<bool>,
    pub show_milliseconds: Option<bool>,
    pub hour_format: Option<HourFormat>,
    pub step_hour: u32,
    pub step_minute: u32,
    pub step_second: u32,
    pub step_millisecond: u32,
    pub fraction_separator: String,
    pub hide_on_date_time_select: bool,

    pub mask: MaskSetting,
    pub mask_slot_char: String,
    pub mask_auto_clear: bool,

    /// Name of the client runtime object the widget script calls.
    pub runtime: String,
    /// Client-side variable name; derived from the client id when unset.
    pub widget_var: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            pattern: None,
            value_kind: None,
            selection_mode: SelectionMode::Single,
            range_separator: DEFAULT_RANGE_SEPARATOR.to_string(),
            time_separator: ":".to_string(),
            number_of_months: 1,
            locale: "en_US".to_string(),
            inline: false,
            show_icon: false,
            disabled: false,
            style: None,
            style_class: None,
            placeholder: None,
            year_range: None,
            min_date: None,
            max_date: None,
            month_navigator: false,
            year_navigator: false,
            show_button_bar: false,
            show_week: false,
            show_other_months: false,
            select_other_months: false,
            touch_ui: false,
            view: None,
            disabled_days: Vec::new(),
            focus_on_select: false,
            show_on_focus: true,
            short_year_cutoff: None,
            show_min_max_range: true,
            auto_month_format: true,
            panel_style: None,
            panel_style_class: None,
            keep_invalid: false,
            max_date_count: None,
            date_template: None,
            before_show: None,
            on_month_change: None,
            on_year_change: None,
            week_calculator: None,
            show_time: None,
            time_only: None,
            show_seconds: None,
            show_milliseconds: None,
            hour_format: None,
            step_hour: 1,
            step_minute: 1,
            step_second: 1,
            step_millisecond: 1,
            fraction_separator: ".".to_string(),
            hide_on_date_time_select: false,
            mask: MaskSetting::Disabled,
            mask_slot_char: "_".to_string(),
            mask_auto_clear: true,
            runtime: DEFAULT_RUNTIME.to_string(),
            widget_var: None,
        }
    }
}

impl PickerConfig {
    /// Builder: set the date pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Builder: set the bound value kind.
    #[must_use]
    pub fn with_value_kind(mut self, kind: TemporalKind) -> Self {
        self.value_kind = Some(kind);
        self
    }

    /// Builder: set the selection mode.
    #[must_use]
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Builder: set the number of visible months.
    #[must_use]
    pub fn with_number_of_months(mut self, months: u32) -> Self {
        self.number_of_months = months;
        self
    }

    /// Builder: set input masking.
    #[must_use]
    pub fn with_mask(mut self, mask: MaskSetting) -> Self {
        self.mask = mask;
        self
    }

    /// Builder: set the locale name.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Returns the configured pattern, or a default for the value kind.
    pub fn calculate_pattern(&self) -> String {
        if let Some(pattern) = &self.pattern {
            return pattern.clone();
        }
        let time_only = self
            .time_only
            .unwrap_or(self.value_kind == Some(TemporalKind::Time));
        let show_time = self
            .show_time
            .unwrap_or(self.value_kind == Some(TemporalKind::DateTime));
        let seconds = if self.show_seconds == Some(true) {
            ":ss"
        } else {
            ""
        };
        if time_only {
            format!("{}{}", DEFAULT_TIME_PATTERN, seconds)
        } else if show_time {
            format!("{}{}", DEFAULT_DATE_TIME_PATTERN, seconds)
        } else {
            DEFAULT_DATE_PATTERN.to_string()
        }
    }

    /// Compiles [`PickerConfig::calculate_pattern`].
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not compile.
    pub fn compile_pattern(&self) -> RenderResult<DatePattern> {
        Ok(DatePattern::new(&self.calculate_pattern())?)
    }

    /// Resolves the locale name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownLocale`] for names chrono does not know.
    pub fn resolve_locale(&self) -> RenderResult<Locale> {
        parse_locale(&self.locale).ok_or_else(|| RenderError::UnknownLocale {
            name: self.locale.clone(),
        })
    }

    /// Returns the options used to convert submitted text.
    pub fn convert_options(&self) -> ConvertOptions {
        let options = ConvertOptions::new(self.selection_mode)
            .with_range_separator(self.range_separator.clone());
        match self.value_kind {
            Some(kind) => options.with_value_kind(kind),
            None => options,
        }
    }

    /// Checks the configuration for inconsistencies.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> RenderResult<()> {
        self.compile_pattern()?;
        self.resolve_locale()?;
        if self.number_of_months == 0 {
            return Err(RenderError::config("number_of_months must be at least 1"));
        }
        if self.step_hour == 0
            || self.step_minute == 0
            || self.step_second == 0
            || self.step_millisecond == 0
        {
            return Err(RenderError::config("time steps must be at least 1"));
        }
        if let Some(day) = self.disabled_days.iter().find(|d| **d > 6) {
            return Err(RenderError::config(format!(
                "disabled day {} is not a weekday number (0-6)",
                day
            )));
        }
        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(RenderError::config(format!(
                    "min_date {} is after max_date {}",
                    min, max
                )));
            }
        }
        if self.range_separator.trim().is_empty() {
            return Err(RenderError::config("range_separator must not be blank"));
        }
        if self.max_date_count == Some(0) {
            return Err(RenderError::config("max_date_count must be at least 1"));
        }
        Ok(())
    }

    /// Returns `true` when only the time of day is picked.
    pub(crate) fn is_time_only(&self) -> bool {
        self.time_only
            .unwrap_or(self.value_kind == Some(TemporalKind::Time))
    }
}

impl HostComponent for PickerConfig {
    fn number_of_months(&self) -> u32 {
        self.number_of_months
    }

    fn calculate_widget_pattern(&self) -> RenderResult<DatePattern> {
        let pattern = self.compile_pattern()?;
        if self.is_time_only() {
            return Ok(pattern.time_part().unwrap_or(pattern));
        }
        Ok(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.number_of_months, 1);
        assert_eq!(config.range_separator, "-");
        assert_eq!(config.calculate_pattern(), "MM/dd/yyyy");
        assert_eq!(config.mask, MaskSetting::Disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn calculated_pattern_follows_value_kind() {
        let config = PickerConfig::default().with_value_kind(TemporalKind::DateTime);
        assert_eq!(config.calculate_pattern(), "MM/dd/yyyy HH:mm");

        let config = PickerConfig::default().with_value_kind(TemporalKind::Time);
        assert_eq!(config.calculate_pattern(), "HH:mm");

        let config = PickerConfig {
            show_time: Some(true),
            show_seconds: Some(true),
            ..Default::default()
        };
        assert_eq!(config.calculate_pattern(), "MM/dd/yyyy HH:mm:ss");

        let config = PickerConfig::default()
            .with_value_kind(TemporalKind::Time)
            .with_pattern("HH.mm");
        assert_eq!(config.calculate_pattern(), "HH.mm");
    }

    #[test]
    fn widget_pattern_for_time_only() {
        let config = PickerConfig {
            time_only: Some(true),
            ..Default::default()
        }
        .with_pattern("yyyy-MM-dd HH:mm");
        assert_eq!(config.calculate_widget_pattern().unwrap().as_str(), "HH:mm");

        let config = PickerConfig::default().with_pattern("yyyy-MM-dd HH:mm");
        assert_eq!(
            config.calculate_widget_pattern().unwrap().as_str(),
            "yyyy-MM-dd HH:mm"
        );
    }

    #[test]
    fn convert_options() {
        let config = PickerConfig {
            range_separator: "to".to_string(),
            ..Default::default()
        }
        .with_selection_mode(SelectionMode::Range)
        .with_value_kind(TemporalKind::DateTime);
        let options = config.convert_options();
        assert_eq!(options.mode, SelectionMode::Range);
        assert_eq!(options.range_separator, "to");
        assert_eq!(options.value_kind, Some(TemporalKind::DateTime));
    }

    #[test]
    fn locale_resolution() {
        assert_eq!(
            PickerConfig::default()
                .with_locale("fr-FR")
                .resolve_locale()
                .unwrap(),
            Locale::fr_FR
        );
        assert!(matches!(
            PickerConfig::default()
                .with_locale("xx_YY")
                .resolve_locale(),
            Err(RenderError::UnknownLocale { .. })
        ));
    }

    #[test]
    fn validation_errors() {
        let config = PickerConfig::default().with_number_of_months(0);
        assert!(matches!(config.validate(), Err(RenderError::Config { .. })));

        let config = PickerConfig {
            disabled_days: vec![0, 7],
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "configuration error: disabled day 7 is not a weekday number (0-6)"
        );

        let config = PickerConfig {
            min_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            max_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PickerConfig {
            step_millisecond: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "configuration error: time steps must be at least 1"
        );

        let config = PickerConfig {
            max_date_count: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::Config { .. })));

        let config = PickerConfig::default().with_pattern("yyyy-MM-dd 'oops");
        assert!(matches!(config.validate(), Err(RenderError::Pattern(_))));
    }

    #[test]
    fn mask_setting_serde() {
        #[derive(Deserialize, Serialize)]
        struct Holder {
            mask: MaskSetting,
        }

        let holder: Holder = serde_json::from_str(r#"{"mask":true}"#).unwrap();
        assert_eq!(holder.mask, MaskSetting::FromPattern);
        let holder: Holder = serde_json::from_str(r#"{"mask":"false"}"#).unwrap();
        assert_eq!(holder.mask, MaskSetting::Disabled);
        let holder: Holder = serde_json::from_str(r#"{"mask":"99/99"}"#).unwrap();
        assert_eq!(holder.mask, MaskSetting::Custom("99/99".to_string()));

        let json = serde_json::to_string(&Holder {
            mask: MaskSetting::FromPattern,
        })
        .unwrap();
        assert_eq!(json, r#"{"mask":true}"#);
    }

    #[test]
    fn config_json_uses_defaults_for_missing_fields() {
        let config: PickerConfig = serde_json::from_str(
            r#"{"pattern":"dd.MM.yyyy","selection_mode":"range","hour_format":"12"}"#,
        )
        .unwrap();
        assert_eq!(config.pattern.as_deref(), Some("dd.MM.yyyy"));
        assert_eq!(config.selection_mode, SelectionMode::Range);
        assert_eq!(config.hour_format, Some(HourFormat::H12));
        assert_eq!(config.step_minute, 1);
        assert_eq!(config.runtime, DEFAULT_RUNTIME);
        assert!(config.show_on_focus);
        assert_eq!(config.fraction_separator, ".");
        assert_eq!(config.max_date_count, None);
    }
}
