//! Widget script builder.
//!
//! Produces the script that creates a widget on the client:
//!
//! ```text
//! PickerKit.cw("DatePicker","widget_dp",{id:"dp",dateFormat:"mm/dd/yy"});
//! ```
//!
//! Attribute names are written bare and values as JSON, so the object is
//! a JavaScript literal. Native attributes are written verbatim, which lets
//! callers pass function expressions.

use serde_json::Value;

/// Runtime object the widget script calls by default.
pub const DEFAULT_RUNTIME: &str = "PickerKit";

/// Builds a widget creation script.
#[derive(Debug, Clone)]
pub struct WidgetBuilder {
    runtime: String,
    widget: String,
    widget_var: String,
    attrs: Vec<(String, String)>,
}

impl WidgetBuilder {
    /// Starts a script for `widget` stored in `widget_var`, with the `id`
    /// attribute set to `client_id`.
    pub fn new(
        runtime: impl Into<String>,
        widget: impl Into<String>,
        widget_var: impl Into<String>,
        client_id: &str,
    ) -> Self {
        Self {
            runtime: runtime.into(),
            widget: widget.into(),
            widget_var: widget_var.into(),
            attrs: Vec::new(),
        }
        .attr("id", client_id)
    }

    /// Derives the client-side variable name from a client id.
    pub fn widget_var_for(client_id: &str) -> String {
        let sanitized: String = client_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("widget_{}", sanitized)
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        self.attrs
            .push((name.to_string(), escape_script(&value.to_string())));
        self
    }

    /// Adds an attribute unless it equals `default`.
    #[must_use]
    pub fn attr_default<T>(self, name: &str, value: T, default: T) -> Self
    where
        T: Into<Value> + PartialEq,
    {
        if value == default {
            return self;
        }
        self.attr(name, value)
    }

    /// Adds an attribute when a value is present.
    #[must_use]
    pub fn opt_attr<T: Into<Value>>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Adds an attribute whose value is written verbatim.
    #[must_use]
    pub fn native_attr(mut self, name: &str, raw: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), raw.into()));
        self
    }

    /// Returns `true` if an attribute with this name was added.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    /// Finishes the script.
    pub fn finish(self) -> String {
        let body = self
            .attrs
            .iter()
            .map(|(name, value)| format!("{}:{}", name, value))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}.cw({},{},{{{}}});",
            self.runtime,
            Value::from(self.widget),
            Value::from(self.widget_var),
            body
        )
    }
}

// A JSON string may contain `</script>`; split it so the tag is not closed.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
