//! A small HTML writer.
//!
//! Elements are written in order; attributes may be added while the start
//! tag is still open. Void elements such as `<input>` are closed with `/>`.

/// Escapes text for use in HTML content or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

const VOID_ELEMENTS: &[&str] = &["input", "br", "img", "hr", "meta", "link"];

/// Streams markup into a string.
#[derive(Debug, Default)]
pub struct MarkupWriter {
    out: String,
    stack: Vec<String>,
    start_tag_open: bool,
}

impl MarkupWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    fn close_start_tag(&mut self) {
        if self.start_tag_open {
            self.out.push('>');
            self.start_tag_open = false;
        }
    }

    /// Opens an element.
    pub fn start_element(&mut self, name: &str) -> &mut Self {
        self.close_start_tag();
        self.out.push('<');
        self.out.push_str(name);
        self.stack.push(name.to_string());
        self.start_tag_open = true;
        self
    }

    /// Adds an attribute to the open start tag.
    ///
    /// Ignored once content has been written to the element.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        if self.start_tag_open {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&html_escape(value));
            self.out.push('"');
        }
        self
    }

    /// Adds an attribute only when a value is present.
    pub fn write_optional_attribute(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.write_attribute(name, value);
        }
        self
    }

    /// Adds a boolean attribute (`disabled="disabled"`) when `on` is set.
    pub fn write_flag(&mut self, name: &str, on: bool) -> &mut Self {
        if on {
            self.write_attribute(name, name);
        }
        self
    }

    /// Writes escaped text content.
    pub fn write_text(&mut self, text: &str) -> &mut Self {
        self.close_start_tag();
        self.out.push_str(&html_escape(text));
        self
    }

    /// Closes the innermost open element.
    pub fn end_element(&mut self) -> &mut Self {
        let Some(name) = self.stack.pop() else {
            return self;
        };
        if self.start_tag_open && VOID_ELEMENTS.contains(&name.as_str()) {
            self.out.push_str("/>");
            self.start_tag_open = false;
            return self;
        }
        self.close_start_tag();
        self.out.push_str("</");
        self.out.push_str(&name);
        self.out.push('>');
        self
    }

    /// Closes every open element and returns the markup.
    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.end_element();
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
    }

    #[test]
    fn nested_elements() {
        let mut w = MarkupWriter::new();
        w.start_element("span").write_attribute("id", "dp");
        w.start_element("input")
            .write_attribute("value", "a\"b")
            .write_flag("disabled", true)
            .write_flag("readonly", false);
        w.end_element();
        w.end_element();
        assert_eq!(
            w.finish(),
            r#"<span id="dp"><input value="a&quot;b" disabled="disabled"/></span>"#
        );
    }

    #[test]
    fn text_content_and_late_attributes() {
        let mut w = MarkupWriter::new();
        w.start_element("label").write_text("a < b");
        w.write_attribute("ignored", "x");
        w.end_element();
        assert_eq!(w.finish(), "<label>a &lt; b</label>");
    }

    #[test]
    fn finish_closes_open_elements() {
        let mut w = MarkupWriter::new();
        w.start_element("div").write_optional_attribute("style", None);
        w.start_element("span");
        assert_eq!(w.finish(), "<div><span></span></div>");
    }
}
