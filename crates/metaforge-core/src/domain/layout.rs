//! Page-layout editing.
//!
//! A layout document is parsed into a shallow tree of sections and their
//! columns (byte spans into the original text), so edits only touch the
//! exact region they target and everything else in the file is preserved
//! byte for byte.
//!
//! ## Section selection
//!
//! New fields go into the first column of the **first** section whose
//! style starts with `TwoColumns` (`TwoColumnsTopToBottom`,
//! `TwoColumnsLeftToRight`). Later two-column sections are never chosen.
//! See [`LayoutDocument::target_section`].

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{
    error::DomainError,
    xml::{XmlWriter, escape},
};

const TWO_COLUMN_PREFIX: &str = "TwoColumns";
const COLUMN_CLOSE: &str = "</layoutColumns>";
const LAYOUT_CLOSE: &str = "</Layout>";
const RELATED_LIST_COLUMN: &str = "NAME";

fn section_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<layoutSections>.*?</layoutSections>").expect("section pattern is valid")
    })
}

fn style_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<style>\s*([^<]*?)\s*</style>").expect("style pattern is valid"))
}

fn column_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<layoutColumns\s*/>|<layoutColumns>.*?</layoutColumns>")
            .expect("column pattern is valid")
    })
}

/// One `<layoutColumns>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutColumn {
    pub span: Range<usize>,
    pub self_closing: bool,
}

/// One `<layoutSections>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSection {
    pub span: Range<usize>,
    pub style: Option<String>,
    pub columns: Vec<LayoutColumn>,
}

impl LayoutSection {
    pub fn is_two_column(&self) -> bool {
        self.style
            .as_deref()
            .is_some_and(|s| s.starts_with(TWO_COLUMN_PREFIX))
    }
}

/// Result of an in-memory layout edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutChange {
    Inserted,
    AlreadyPresent,
    NoTwoColumnSection,
}

/// A layout document held as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDocument {
    text: String,
}

impl LayoutDocument {
    pub fn parse(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if !text.contains(LAYOUT_CLOSE) {
            return Err(DomainError::MalformedDocument {
                kind: "layout",
                reason: format!("missing closing {LAYOUT_CLOSE} tag"),
            });
        }
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Sections in document order.
    pub fn sections(&self) -> Vec<LayoutSection> {
        section_pattern()
            .find_iter(&self.text)
            .map(|section| {
                let body = section.as_str();
                let style = style_pattern()
                    .captures(body)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string());
                let columns = column_pattern()
                    .find_iter(body)
                    .map(|col| LayoutColumn {
                        span: section.start() + col.start()..section.start() + col.end(),
                        self_closing: !col.as_str().ends_with(COLUMN_CLOSE),
                    })
                    .collect();
                LayoutSection {
                    span: section.range(),
                    style,
                    columns,
                }
            })
            .collect()
    }

    /// The section new fields are inserted into: the first two-column
    /// section that has at least one column.
    pub fn target_section(&self) -> Option<LayoutSection> {
        self.sections()
            .into_iter()
            .find(|s| s.is_two_column() && !s.columns.is_empty())
    }

    pub fn contains_field(&self, field_api_name: &str) -> bool {
        self.text
            .contains(&format!("<field>{}</field>", escape(field_api_name)))
    }

    pub fn contains_related_list(&self, related_list: &str) -> bool {
        self.text
            .contains(&format!("<relatedList>{}</relatedList>", escape(related_list)))
    }

    /// Append an Edit-behaviour field item to the first column of the
    /// target section.
    pub fn add_field(&mut self, field_api_name: &str) -> LayoutChange {
        if self.contains_field(field_api_name) {
            return LayoutChange::AlreadyPresent;
        }
        let Some(column) = self
            .target_section()
            .and_then(|section| section.columns.into_iter().next())
        else {
            return LayoutChange::NoTwoColumnSection;
        };

        let column_indent = line_indent(&self.text, column.span.start);
        let item_indent = format!("{column_indent}    ");

        let mut item = XmlWriter::fragment(0);
        item.open("layoutItems")
            .leaf("behavior", "Edit")
            .leaf("field", field_api_name);
        let item = indent_block(&item.finish(), &item_indent);

        if column.self_closing {
            let replacement = format!("<layoutColumns>\n{item}{column_indent}{COLUMN_CLOSE}");
            self.text.replace_range(column.span, &replacement);
        } else {
            let close_at = column.span.end - COLUMN_CLOSE.len();
            self.insert_before_tag(close_at, &item);
        }
        LayoutChange::Inserted
    }

    /// Append a related list for `child.lookup` just before `</Layout>`.
    pub fn add_related_list(&mut self, child_api_name: &str, lookup_field_api_name: &str) -> LayoutChange {
        let related_list = related_list_id(child_api_name, lookup_field_api_name);
        if self.contains_related_list(&related_list) {
            return LayoutChange::AlreadyPresent;
        }

        let mut block = XmlWriter::fragment(1);
        block
            .open("relatedLists")
            .leaf("fields", RELATED_LIST_COLUMN)
            .leaf("relatedList", &related_list);
        let block = block.finish();

        // parse() guarantees the closing tag exists
        let close_at = self.text.rfind(LAYOUT_CLOSE).unwrap_or(self.text.len());
        self.insert_before_tag(close_at, &block);
        LayoutChange::Inserted
    }

    /// Insert whole lines in front of the tag starting at `tag_at`, keeping
    /// the tag's own indentation intact.
    fn insert_before_tag(&mut self, tag_at: usize, lines: &str) {
        let line_start = self.text[..tag_at].rfind('\n').map_or(0, |i| i + 1);
        if self.text[line_start..tag_at].chars().all(char::is_whitespace) {
            self.text.insert_str(line_start, lines);
        } else {
            let indent = line_indent(&self.text, line_start);
            self.text.insert_str(tag_at, &format!("\n{lines}{indent}"));
        }
    }
}

/// Identifier of a related list: `<childObject>.<lookupField>`.
pub fn related_list_id(child_api_name: &str, lookup_field_api_name: &str) -> String {
    format!("{child_api_name}.{lookup_field_api_name}")
}

/// Leading whitespace of the line containing `pos`.
fn line_indent(text: &str, pos: usize) -> String {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

fn indent_block(block: &str, prefix: &str) -> String {
    block
        .lines()
        .map(|line| format!("{prefix}{line}\n"))
        .collect()
}
