//! Date picker renderer.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use pickerkit_core::value::{anchor_date, end_of_day_time};
use pickerkit_core::{
    ConvertResult, DEFAULT_RANGE_SEPARATOR, DateMetadataModel, DatePattern, DateValue, Locale,
    MULTIPLE_SEPARATOR, Selection, SelectionMode, TemporalKind, convert,
};
use pickerkit_protocol::INPUT_SUFFIX;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{HostComponent, MaskSetting, PickerConfig};
use crate::error::{RenderError, RenderResult};
use crate::html::MarkupWriter;
use crate::widget::WidgetBuilder;

/// Class of the container element.
pub const CONTAINER_CLASS: &str = "ui-calendar";

/// Class marking the container as a date picker.
pub const CONTAINER_EXTENSION_CLASS: &str = "p-datepicker";

/// Classes of the visible text input.
pub const INPUT_CLASS: &str = "ui-inputfield ui-widget ui-state-default ui-corner-all";

const WIDGET_NAME: &str = "DatePicker";

/// Which time controls the widget shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDisplay {
    pub show_time: bool,
    pub time_only: bool,
    pub show_seconds: bool,
    pub show_milliseconds: bool,
}

impl TimeDisplay {
    /// Resolves the time display from explicit settings, falling back to
    /// the bound value kind and then to the pattern.
    pub fn resolve(config: &PickerConfig, pattern: &DatePattern) -> Self {
        let show_time = config.show_time.unwrap_or_else(|| match config.value_kind {
            Some(kind) => kind == TemporalKind::DateTime,
            None => pattern.has_time(),
        });
        let time_only = config
            .time_only
            .unwrap_or(config.value_kind == Some(TemporalKind::Time));
        Self {
            show_time,
            time_only,
            show_seconds: config.show_seconds.unwrap_or_else(|| pattern.has_seconds()),
            show_milliseconds: config
                .show_milliseconds
                .unwrap_or_else(|| pattern.has_milliseconds()),
        }
    }

    /// Returns `true` if any time control is shown.
    pub fn has_time(&self) -> bool {
        self.show_time || self.time_only
    }
}

/// Resolves the input mask sent to the widget.
///
/// Returns `None` when masking is disabled. A mask derived from the pattern
/// is repeated around the separator for range selection.
///
/// # Errors
///
/// Returns [`RenderError::UnsupportedMask`] for a derived mask with multiple
/// selection, and a pattern error if the pattern has textual fields.
pub fn resolve_mask(config: &PickerConfig, pattern: &DatePattern) -> RenderResult<Option<String>> {
    match &config.mask {
        MaskSetting::Disabled => Ok(None),
        MaskSetting::Custom(mask) => Ok(Some(mask.clone())),
        MaskSetting::FromPattern => match config.selection_mode {
            SelectionMode::Multiple => Err(RenderError::UnsupportedMask {
                mode: SelectionMode::Multiple,
            }),
            SelectionMode::Range => {
                let mask = pattern.to_mask()?;
                Ok(Some(format!(
                    "{} {} {}",
                    mask, config.range_separator, mask
                )))
            }
            SelectionMode::Single => Ok(Some(pattern.to_mask()?)),
        },
    }
}

/// Per-request inputs to [`DatePickerRenderer::render`].
pub struct RenderContext<'a> {
    pub client_id: String,
    /// Text shown in the input: the submitted text or the formatted value.
    pub value: Option<String>,
    /// Whether converting the last submission failed.
    pub conversion_failed: bool,
    /// Current instant, used as the default date after a failed conversion.
    pub now: NaiveDateTime,
    pub model: Option<&'a dyn DateMetadataModel>,
}

impl<'a> RenderContext<'a> {
    /// Creates a context for `client_id` with no value.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            value: None,
            conversion_failed: false,
            now: Local::now().naive_local(),
            model: None,
        }
    }

    /// Builder: set the input text.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder: mark the last conversion as failed.
    #[must_use]
    pub fn with_conversion_failed(mut self) -> Self {
        self.conversion_failed = true;
        self
    }

    /// Builder: fix the current instant.
    #[must_use]
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Builder: attach the metadata model.
    #[must_use]
    pub fn with_model(mut self, model: &'a dyn DateMetadataModel) -> Self {
        self.model = Some(model);
        self
    }
}

/// Output of a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedWidget {
    pub markup: String,
    pub script: String,
}

/// Renders date pickers for one configuration.
#[derive(Debug)]
pub struct DatePickerRenderer<'c> {
    config: &'c PickerConfig,
    pattern: DatePattern,
    widget_pattern: DatePattern,
    locale: Locale,
    time: TimeDisplay,
}

impl<'c> DatePickerRenderer<'c> {
    /// Prepares a renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: &'c PickerConfig) -> RenderResult<Self> {
        config.validate()?;
        let pattern = config.compile_pattern()?;
        let widget_pattern = config.calculate_widget_pattern()?;
        let locale = config.resolve_locale()?;
        let time = TimeDisplay::resolve(config, &pattern);
        Ok(Self {
            config,
            pattern,
            widget_pattern,
            locale,
            time,
        })
    }

    pub fn config(&self) -> &PickerConfig {
        self.config
    }

    /// Pattern used for text exchanged with the widget.
    pub fn widget_pattern(&self) -> &DatePattern {
        &self.widget_pattern
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn time_display(&self) -> TimeDisplay {
        self.time
    }

    /// Converts submitted input text.
    ///
    /// Month and weekday names are read in the picker's locale, so text
    /// from [`DatePickerRenderer::format_selection`] converts back.
    ///
    /// # Errors
    ///
    /// Returns an error if a part of the text does not match the pattern.
    pub fn convert(&self, submitted: &str) -> ConvertResult<Selection> {
        let options = self.config.convert_options().with_locale(self.locale);
        convert(submitted, &self.widget_pattern, &options)
    }

    /// Formats a value as the widget shows it.
    pub fn format_value(&self, value: &DateValue) -> String {
        self.widget_pattern.format(value, self.locale)
    }

    /// Formats a selection back into input text.
    pub fn format_selection(&self, selection: &Selection) -> String {
        match selection {
            Selection::Empty => String::new(),
            Selection::Single { value } => self.format_value(value),
            Selection::Multiple { values } => values
                .iter()
                .map(|v| self.format_value(v))
                .collect::<Vec<_>>()
                .join(&MULTIPLE_SEPARATOR.to_string()),
            Selection::Range { start, end } => format!(
                "{} {} {}",
                self.format_value(start),
                self.config.range_separator,
                self.format_value(end)
            ),
        }
    }

    /// Renders the markup and widget script.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask cannot be resolved.
    pub fn render(&self, ctx: &RenderContext<'_>) -> RenderResult<RenderedWidget> {
        let markup = self.encode_markup(ctx);
        let script = self.encode_script(ctx)?;
        debug!(
            client_id = %ctx.client_id,
            pattern = %self.widget_pattern,
            lazy = ctx.model.is_some_and(|m| m.is_lazy()),
            "Rendered date picker"
        );
        Ok(RenderedWidget { markup, script })
    }

    fn encode_markup(&self, ctx: &RenderContext<'_>) -> String {
        let config = self.config;
        let mut class = format!("{} {}", CONTAINER_EXTENSION_CLASS, CONTAINER_CLASS);
        if let Some(style_class) = &config.style_class {
            class.push(' ');
            class.push_str(style_class);
        }
        let input_id = format!("{}{}", ctx.client_id, INPUT_SUFFIX);
        let value = ctx.value.as_deref().filter(|v| !v.is_empty());

        let mut w = MarkupWriter::new();
        w.start_element("span")
            .write_attribute("id", &ctx.client_id)
            .write_attribute("class", &class)
            .write_optional_attribute("style", config.style.as_deref());

        w.start_element("input")
            .write_attribute("id", &input_id)
            .write_attribute("name", &input_id);
        if config.inline {
            w.write_attribute("type", "hidden");
        } else {
            w.write_attribute("type", "text")
                .write_attribute("class", INPUT_CLASS);
        }
        w.write_optional_attribute("value", value)
            .write_optional_attribute("placeholder", config.placeholder.as_deref())
            .write_flag("disabled", config.disabled);
        w.end_element();

        w.end_element();
        w.finish()
    }

    fn encode_script(&self, ctx: &RenderContext<'_>) -> RenderResult<String> {
        let config = self.config;
        let widget_var = config
            .widget_var
            .clone()
            .unwrap_or_else(|| WidgetBuilder::widget_var_for(&ctx.client_id));

        let default_date = if ctx.conversion_failed {
            Some(self.format_value(&DateValue::DateTime(ctx.now)))
        } else {
            ctx.value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };
        let (am, pm) = am_pm_markers(self.locale);

        let mut wb = WidgetBuilder::new(&config.runtime, WIDGET_NAME, widget_var, &ctx.client_id)
            .opt_attr("defaultDate", default_date)
            .attr_default("inline", config.inline, false)
            .attr("userLocale", config.locale.as_str())
            .attr_default("localeAm", am.as_str(), "AM")
            .attr_default("localePm", pm.as_str(), "PM")
            .attr("dateFormat", self.widget_pattern.to_client_format())
            .attr_default("showIcon", config.show_icon, false)
            .attr_default("focusOnSelect", config.focus_on_select, false)
            .attr_default("disabled", config.disabled, false)
            .opt_attr("yearRange", config.year_range.as_deref())
            .opt_attr("minDate", config.min_date.map(|d| self.min_max_date(d, false)))
            .opt_attr("maxDate", config.max_date.map(|d| self.min_max_date(d, true)))
            .attr_default(
                "selectionMode",
                config.selection_mode.as_str(),
                SelectionMode::Single.as_str(),
            )
            .attr_default("showOnFocus", config.show_on_focus, true)
            .opt_attr("shortYearCutoff", config.short_year_cutoff.as_deref())
            .attr_default("monthNavigator", config.month_navigator, false)
            .attr_default("yearNavigator", config.year_navigator, false)
            .attr_default("showButtonBar", config.show_button_bar, false)
            .attr_default("showMinMaxRange", config.show_min_max_range, true)
            .attr_default("autoMonthFormat", config.auto_month_format, true)
            .opt_attr("panelStyleClass", config.panel_style_class.as_deref())
            .opt_attr("panelStyle", config.panel_style.as_deref())
            .attr_default("keepInvalid", config.keep_invalid, false)
            .opt_attr("maxDateCount", config.max_date_count)
            .attr_default("numberOfMonths", config.number_of_months, 1)
            .opt_attr("view", config.view.as_deref())
            .attr_default("touchUI", config.touch_ui, false)
            .attr_default("showWeek", config.show_week, false)
            .attr_default(
                "rangeSeparator",
                config.range_separator.as_str(),
                DEFAULT_RANGE_SEPARATOR,
            )
            .attr_default("timeSeparator", config.time_separator.as_str(), ":")
            .attr_default("fractionSeparator", config.fraction_separator.as_str(), ".")
            .attr_default(
                "lazyModel",
                ctx.model.is_some_and(|m| m.is_lazy()),
                false,
            );

        if !config.disabled_days.is_empty() {
            wb = wb.attr("disabledDays", config.disabled_days.clone());
        }

        if let Some(model) = ctx.model {
            let disabled_dates: Vec<String> = model
                .entries()
                .iter()
                .filter(|(_, metadata)| metadata.disabled)
                .map(|(date, _)| self.format_value(&DateValue::Date(*date)))
                .collect();
            if !disabled_dates.is_empty() {
                wb = wb.attr("disabledDates", disabled_dates);
            }

            // keyed by ISO date whatever the pattern
            let mut style_classes = Map::new();
            for (date, metadata) in model.entries() {
                if let Some(style_class) = &metadata.style_class {
                    style_classes.insert(date.to_string(), Value::from(style_class.as_str()));
                }
            }
            wb = wb.attr("dateStyleClasses", Value::Object(style_classes));
        }

        let hooks = [
            ("dateTemplate", &config.date_template),
            ("preShow", &config.before_show),
            ("onMonthChange", &config.on_month_change),
            ("onYearChange", &config.on_year_change),
            ("weekCalculator", &config.week_calculator),
        ];
        for (name, code) in hooks {
            if let Some(code) = code {
                wb = wb.native_attr(name, code.as_str());
            }
        }

        if config.show_other_months {
            wb = wb
                .attr("showOtherMonths", true)
                .attr("selectOtherMonths", config.select_other_months);
        }

        if self.time.has_time() {
            wb = wb
                .attr_default("showTime", self.time.show_time, false)
                .opt_attr("hourFormat", config.hour_format.map(|h| h.as_str()))
                .attr_default("timeOnly", self.time.time_only, false)
                .attr_default("showSeconds", self.time.show_seconds, false)
                .attr_default("showMilliseconds", self.time.show_milliseconds, false)
                .attr_default("stepHour", config.step_hour, 1)
                .attr_default("stepMinute", config.step_minute, 1)
                .attr_default("stepSecond", config.step_second, 1)
                .attr_default("stepMillisecond", config.step_millisecond, 1)
                .attr_default(
                    "hideOnDateTimeSelect",
                    config.hide_on_date_time_select,
                    false,
                );
        }

        if let Some(mask) = resolve_mask(config, &self.pattern)? {
            wb = wb
                .attr("mask", mask)
                .attr_default("maskSlotChar", config.mask_slot_char.as_str(), "_")
                .attr_default("maskAutoClear", config.mask_auto_clear, true);
        }

        Ok(wb.finish())
    }

    // A date-only bound covers the whole day once the widget shows time.
    fn min_max_date(&self, date: NaiveDate, max: bool) -> String {
        let value = if self.time.show_time {
            let time = if max { end_of_day_time() } else { NaiveTime::MIN };
            DateValue::DateTime(date.and_time(time))
        } else {
            DateValue::Date(date)
        };
        self.format_value(&value)
    }
}

fn am_pm_markers(locale: Locale) -> (String, String) {
    let marker = |hour: u32, fallback: &str| {
        let text = anchor_date()
            .and_hms_opt(hour, 0, 0)
            .map(|dt| dt.and_utc().format_localized("%p", locale).to_string())
            .unwrap_or_default();
        if text.is_empty() {
            fallback.to_string()
        } else {
            text
        }
    };
    (marker(9, "AM"), marker(21, "PM"))
}
