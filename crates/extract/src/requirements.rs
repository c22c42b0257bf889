//! Crafting requirement summaries.
//!
//! The requirements cell of the recipe list mixes nested lists, bold
//! "Level N" headers and loose text. [`Requirements`] flattens all of that
//! into named level groups of bullet items, and its `Display` impl renders
//! the groups as chat-friendly text:
//!
//! ```text
//! **Level 1:**
//! • Wood x2
//!
//! **Level 2:**
//! • Bronze x1
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use scraper::{ElementRef, Html, Node};
use tracing::instrument;

use crate::consts;
use crate::extract::row::{clean, collapse};

const DEFAULT_LEVEL: &str = "Level 1";
const NO_DATA: &str = "(no data)";

/// A named cluster of requirement items sharing a crafting-level header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelGroup {
    pub label: String,
    pub items: Vec<String>,
}
impl LevelGroup {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Requirements {
    groups: Vec<LevelGroup>,
}
impl Requirements {
    /// Parses a requirements cell's markup.
    #[instrument(level = "trace", skip(fragment), fields(fragment_size = fragment.len()))]
    pub fn parse(fragment: &str) -> Self {
        let fragment = Html::parse_fragment(fragment);
        let mut builder = Builder::new();
        builder.walk(fragment.root_element());
        builder.finish()
    }

    pub fn groups(&self) -> &[LevelGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
impl Display for Requirements {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.groups.is_empty() {
            return write!(f, "{NO_DATA}");
        }
        let mut rendered = String::new();
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                rendered.push_str("\n\n");
            }
            rendered.push_str(&format!("**{}:**", group.label));
            for item in &group.items {
                rendered.push_str("\n• ");
                rendered.push_str(item);
            }
        }
        write!(f, "{}", rendered.trim_end())
    }
}

/// Renders a requirements fragment straight to text.
pub fn normalize_requirements(fragment: &str) -> String {
    Requirements::parse(fragment).to_string()
}

struct Builder {
    groups: Vec<LevelGroup>,
    current: LevelGroup,
    last_header: Option<String>,
}
impl Builder {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            current: LevelGroup::new(DEFAULT_LEVEL),
            last_header: None,
        }
    }

    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                },
                _ => {},
            }
        }
    }

    fn element(&mut self, element: ElementRef<'_>) {
        let is_leaf_item =
            element.value().name() == "li" && element.select(&consts::NESTED_LIST_SELECTOR).next().is_none();
        if is_leaf_item {
            let text = collapse(&element.text().collect::<String>());
            if !text.is_empty() {
                self.current.items.push(text);
            }
        } else {
            // Containers, inline markup and list items wrapping nested lists:
            // their own text nodes may be headers, so keep walking.
            self.walk(element);
        }
    }

    fn text(&mut self, text: &str) {
        let text = clean(text);
        if text.trim_end_matches(':').trim().is_empty() {
            return;
        }
        if consts::LEVEL_HEADER_REGEX.is_match(&text) {
            self.header(text.trim_end_matches(':').trim_end());
        } else {
            self.current.items.push(text);
        }
    }

    fn header(&mut self, label: &str) {
        // Bold + plain sibling markup can emit the same header twice.
        if self.last_header.as_deref() == Some(label) {
            return;
        }
        // Items before the first header already sit in the implicit group.
        if self.last_header.is_none() && self.current.label == label {
            self.last_header = Some(label.to_string());
            return;
        }
        let previous = std::mem::replace(&mut self.current, LevelGroup::new(label));
        if !previous.items.is_empty() {
            self.groups.push(previous);
        }
        self.last_header = Some(label.to_string());
    }

    fn finish(mut self) -> Requirements {
        let only_group = self.groups.is_empty() && self.last_header.is_some();
        if !self.current.items.is_empty() || only_group {
            self.groups.push(self.current);
        }
        Requirements { groups: self.groups }
    }
}
