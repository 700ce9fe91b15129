//! Custom tabs and their registration in a Lightning app.

use crate::domain::{error::DomainError, xml::XmlWriter};

const DEFAULT_MOTIF: &str = "Custom57: Building Block";
const APP_CLOSE: &str = "</CustomApplication>";
const TABS_CLOSE: &str = "</tabs>";

/// Render the `CustomTab` document for a custom object.
pub fn render_tab(motif: Option<&str>) -> String {
    let mut w = XmlWriter::document("CustomTab");
    w.leaf_bool("customObject", true)
        .leaf("motif", motif.unwrap_or(DEFAULT_MOTIF));
    w.finish()
}

/// Result of registering a tab with an app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppChange {
    Inserted,
    AlreadyPresent,
}

/// A `CustomApplication` document held as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDocument {
    text: String,
}

impl AppDocument {
    pub fn parse(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if !text.contains(APP_CLOSE) {
            return Err(DomainError::MalformedDocument {
                kind: "application",
                reason: format!("missing closing {APP_CLOSE} tag"),
            });
        }
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn contains_tab(&self, tab: &str) -> bool {
        self.text.contains(&format!("<tabs>{tab}</tabs>"))
    }

    /// Add `<tabs>tab</tabs>` after the last existing tab, or just before
    /// the closing tag when the app lists none yet.
    pub fn add_tab(&mut self, tab: &str) -> AppChange {
        if self.contains_tab(tab) {
            return AppChange::AlreadyPresent;
        }

        let mut entry = XmlWriter::fragment(1);
        entry.leaf("tabs", tab);
        let entry = entry.finish();

        match self.text.rfind(TABS_CLOSE) {
            Some(last) => {
                let after = last + TABS_CLOSE.len();
                let insert_at = match self.text[after..].find('\n') {
                    Some(nl) => after + nl + 1,
                    None => after,
                };
                if insert_at == after {
                    self.text.insert_str(insert_at, &format!("\n{}", entry.trim_end()));
                } else {
                    self.text.insert_str(insert_at, &entry);
                }
            }
            None => {
                let close = self.text.rfind(APP_CLOSE).unwrap_or(self.text.len());
                let line_start = self.text[..close].rfind('\n').map_or(0, |i| i + 1);
                if self.text[line_start..close].trim().is_empty() {
                    self.text.insert_str(line_start, &entry);
                } else {
                    self.text.insert_str(close, &format!("\n{entry}"));
                }
            }
        }
        AppChange::Inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomApplication xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Dreamhouse</label>
    <navType>Standard</navType>
    <tabs>standard-Account</tabs>
    <tabs>standard-Contact</tabs>
    <uiType>Lightning</uiType>
</CustomApplication>
"#;

    #[test]
    fn tab_document_marks_custom_object() {
        let xml = render_tab(None);
        assert!(xml.contains("<customObject>true</customObject>"));
        assert!(xml.contains("<motif>Custom57: Building Block</motif>"));
        assert!(render_tab(Some("Custom1: Heart")).contains("<motif>Custom1: Heart</motif>"));
    }

    #[test]
    fn tab_is_added_after_last_tab() {
        let mut app = AppDocument::parse(APP).unwrap();
        assert_eq!(app.add_tab("Property__c"), AppChange::Inserted);
        assert!(app.as_str().contains(
            "    <tabs>standard-Contact</tabs>\n    <tabs>Property__c</tabs>\n    <uiType>"
        ));
    }

    #[test]
    fn duplicate_tab_is_not_added() {
        let mut app = AppDocument::parse(APP).unwrap();
        app.add_tab("Property__c");
        let before = app.clone();
        assert_eq!(app.add_tab("Property__c"), AppChange::AlreadyPresent);
        assert_eq!(app, before);
    }

    #[test]
    fn app_without_tabs_gets_tab_before_closing_tag() {
        let text = "<CustomApplication xmlns=\"x\">\n    <label>Empty</label>\n</CustomApplication>\n";
        let mut app = AppDocument::parse(text).unwrap();
        app.add_tab("Offer__c");
        assert_eq!(
            app.as_str(),
            "<CustomApplication xmlns=\"x\">\n    <label>Empty</label>\n    <tabs>Offer__c</tabs>\n</CustomApplication>\n"
        );
    }

    #[test]
    fn malformed_app_is_rejected() {
        assert!(AppDocument::parse("<CustomApplication>").is_err());
    }
}
