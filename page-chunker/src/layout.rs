//! Decoded page tree handed over by a layout source.
//!
//! The shape mirrors what PDF layout analysers produce: a page holds text boxes,
//! a box holds text lines, and a line holds single-character glyphs interleaved
//! with non-glyph markers the analyser inserted (inferred spaces, line breaks).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Index of the page within the source document (0-based).
    pub index: u32,
    #[serde(default)]
    pub boxes: Vec<LayoutTextBox>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutTextBox {
    #[serde(default)]
    pub lines: Vec<LayoutTextLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTextLine {
    /// (x1, y1, x2, y2), larger y is higher on the page.
    pub bbox: [f64; 4],
    #[serde(default)]
    pub items: Vec<LayoutItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutItem {
    Glyph {
        text: String,
        #[serde(rename = "fontname")]
        font_name: String,
        size: f64,
    },
    Anno {
        text: String,
        #[serde(default)]
        extra: BTreeMap<String, serde_json::Value>,
    },
}

impl LayoutItem {
    pub fn glyph(text: impl Into<String>, font_name: impl Into<String>, size: f64) -> Self {
        LayoutItem::Glyph { text: text.into(), font_name: font_name.into(), size }
    }

    pub fn anno(text: impl Into<String>) -> Self {
        LayoutItem::Anno { text: text.into(), extra: BTreeMap::new() }
    }

    pub fn text(&self) -> &str {
        match self {
            LayoutItem::Glyph { text, .. } | LayoutItem::Anno { text, .. } => text,
        }
    }
}

impl LayoutTextLine {
    /// Build a line whose glyphs all share one style, one glyph per character.
    pub fn uniform(bbox: [f64; 4], text: &str, font_name: &str, size: f64) -> Self {
        let items = text
            .chars()
            .map(|c| LayoutItem::glyph(c.to_string(), font_name, size))
            .collect();
        Self { bbox, items }
    }

    /// Append glyphs for `text` in the given style.
    pub fn push_run(&mut self, text: &str, font_name: &str, size: f64) {
        self.items
            .extend(text.chars().map(|c| LayoutItem::glyph(c.to_string(), font_name, size)));
    }
}
