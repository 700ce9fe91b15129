//! Minimal writer for metadata XML documents.
//!
//! Metadata files are small, flat and always share the same shape: an XML
//! declaration, one root element in the metadata namespace, and four-space
//! indented children. [`XmlWriter`] produces exactly that shape.

/// Namespace every metadata document lives in.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "    ";

/// Line-oriented XML builder.
#[derive(Debug)]
pub struct XmlWriter {
    out: String,
    depth: usize,
    stack: Vec<&'static str>,
}

impl XmlWriter {
    /// Start a document whose root element is `root`.
    pub fn document(root: &'static str) -> Self {
        let mut writer = Self::fragment(0);
        writer.out.push_str(XML_DECLARATION);
        writer.out.push('\n');
        writer.line(&format!("<{root} xmlns=\"{METADATA_NAMESPACE}\">"));
        writer.stack.push(root);
        writer.depth = 1;
        writer
    }

    /// Start a bare fragment indented `depth` levels deep.
    pub fn fragment(depth: usize) -> Self {
        Self {
            out: String::new(),
            depth,
            stack: Vec::new(),
        }
    }

    pub fn open(&mut self, tag: &'static str) -> &mut Self {
        self.line(&format!("<{tag}>"));
        self.stack.push(tag);
        self.depth += 1;
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if let Some(tag) = self.stack.pop() {
            self.depth = self.depth.saturating_sub(1);
            self.line(&format!("</{tag}>"));
        }
        self
    }

    /// `<tag>value</tag>` on a single line, value escaped.
    pub fn leaf(&mut self, tag: &str, value: impl AsRef<str>) -> &mut Self {
        self.line(&format!("<{tag}>{}</{tag}>", escape(value.as_ref())));
        self
    }

    pub fn leaf_bool(&mut self, tag: &str, value: bool) -> &mut Self {
        self.leaf(tag, if value { "true" } else { "false" })
    }

    /// Emit the leaf only when a value is present.
    pub fn leaf_opt(&mut self, tag: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.leaf(tag, value);
        }
        self
    }

    /// Close every open element and return the text.
    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.close();
        }
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}

/// Escape the five XML special characters.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_declaration_and_namespace() {
        let mut w = XmlWriter::document("CustomTab");
        w.leaf_bool("customObject", true);
        let xml = w.finish();

        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"<CustomTab xmlns="http://soap.sforce.com/2006/04/metadata">"#));
        assert!(xml.contains("    <customObject>true</customObject>\n"));
        assert!(xml.ends_with("</CustomTab>\n"));
    }

    #[test]
    fn nested_elements_are_indented() {
        let mut w = XmlWriter::document("Layout");
        w.open("relatedLists").leaf("fields", "NAME").close();
        let xml = w.finish();
        assert!(xml.contains("    <relatedLists>\n        <fields>NAME</fields>\n    </relatedLists>\n"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape("R&D <Team>"), "R&amp;D &lt;Team&gt;");
        assert_eq!(escape("\"quoted\" 'single'"), "&quot;quoted&quot; &apos;single&apos;");
    }

    #[test]
    fn optional_leaf_is_skipped_when_absent() {
        let mut w = XmlWriter::fragment(0);
        w.leaf_opt("description", None).leaf_opt("label", Some("Price"));
        assert_eq!(w.finish(), "<label>Price</label>\n");
    }
}
