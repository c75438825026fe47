//! Date picker markup and widget script rendering.
//!
//! Rendering a picker produces two pieces:
//! - the HTML markup: a container `<span>` around a text `<input>`;
//! - the widget script: a call that hands the client runtime a
//!   configuration object for the picker.
//!
//! # Example
//!
//! ```rust
//! use pickerkit_render::{DatePickerRenderer, PickerConfig, RenderContext};
//!
//! let config = PickerConfig::default().with_pattern("yyyy-MM-dd");
//! let renderer = DatePickerRenderer::new(&config).unwrap();
//! let rendered = renderer.render(&RenderContext::new("dp")).unwrap();
//! assert!(rendered.markup.starts_with("<span id=\"dp\""));
//! assert!(rendered.script.contains("dateFormat:\"yy-mm-dd\""));
//! ```

mod config;
mod datepicker;
mod error;
mod html;
mod widget;

pub use config::{HostComponent, HourFormat, MaskSetting, PickerConfig};
pub use datepicker::{
    CONTAINER_CLASS, CONTAINER_EXTENSION_CLASS, DatePickerRenderer, INPUT_CLASS, RenderContext,
    RenderedWidget, TimeDisplay, resolve_mask,
};
pub use error::{RenderError, RenderResult};
pub use html::{MarkupWriter, html_escape};
pub use widget::{DEFAULT_RUNTIME, WidgetBuilder};
