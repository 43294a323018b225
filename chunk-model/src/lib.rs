//! Shared models used across crates

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Axis-aligned box in PDF user space; larger `y` is further toward the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_array(b: [f64; 4]) -> Self { Self::new(b[0], b[1], b[2], b[3]) }

    pub fn to_array(&self) -> [f64; 4] { [self.x1, self.y1, self.x2, self.y2] }

    /// Left edge regardless of corner order.
    pub fn left(&self) -> f64 { self.x1.min(self.x2) }

    /// Top edge regardless of corner order.
    pub fn top(&self) -> f64 { self.y1.max(self.y2) }
}

/// A run of characters within one text line sharing a font name and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(rename = "fontname")]
    pub font_name: String,
    pub size: f64,
}

impl Fragment {
    pub fn new(text: impl Into<String>, font_name: impl Into<String>, size: f64) -> Self {
        Self { text: text.into(), font_name: font_name.into(), size }
    }

    /// Same font name and exactly the same size.
    pub fn same_style(&self, other: &Fragment) -> bool {
        self.size == other.size && self.font_name == other.font_name
    }

    pub fn clean(&mut self) {
        self.text = clean_text(&self.text);
    }
}

/// Non-glyph layout marker emitted by the decoder (inferred space, line break).
/// Only `text` is interpreted; everything else the decoder attached is carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Annotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), extra: BTreeMap::new() }
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One reading-order unit of text (usually a visual line) with its style fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct DocChunk {
    /// 0-based physical page id in decode order.
    pub page_id: u32,
    /// 0 for the first column, 1 for the second.
    pub column: u8,
    pub bbox: BoundingBox,
    pub text: String,
    /// Only set when every glyph shares one font name.
    pub font_name: Option<String>,
    /// Only set when every glyph shares one font size.
    pub font_size: Option<f64>,
    pub fragments: Vec<Fragment>,
    pub annotations: Vec<Annotation>,
    /// Printed page number, inferred after the whole page is known.
    pub page_n: Option<i64>,
}

impl DocChunk {
    pub fn new(page_id: u32, column: u8, bbox: BoundingBox, text: impl Into<String>) -> Self {
        Self {
            page_id,
            column,
            bbox,
            text: text.into(),
            font_name: None,
            font_size: None,
            fragments: Vec::new(),
            annotations: Vec::new(),
            page_n: None,
        }
    }

    /// Fragment texts joined by single spaces and whitespace-collapsed.
    pub fn fragment_text(&self) -> String {
        let joined = self.fragments.iter().map(|f| f.text.as_str()).collect::<Vec<_>>().join(" ");
        clean_text(&joined)
    }
}

impl fmt::Display for DocChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page_n = self.page_n.map(|n| n.to_string()).unwrap_or_else(|| "None".into());
        let font = self.font_name.as_deref().unwrap_or("None");
        let size = self.font_size.map(|s| s.to_string()).unwrap_or_else(|| "None".into());
        write!(
            f,
            "\"{}\" p. {} pageid={} font={} size={} annotations={}",
            self.text,
            page_n,
            self.page_id,
            font,
            size,
            self.annotations.len()
        )
    }
}

// --- Plain record form --------------------------------------------------------

/// Serialized form of a [`DocChunk`] as stored in `chunks.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub text: String,
    #[serde(rename = "pageid")]
    pub page_id: u32,
    #[serde(rename = "pageN", default)]
    pub page_n: Option<i64>,
    #[serde(rename = "fontname", default)]
    pub font_name: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    pub bbox: [f64; 4],
    pub column: u8,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Keys written by other tools; preserved but never interpreted.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl From<&DocChunk> for ChunkRecord {
    fn from(c: &DocChunk) -> Self {
        ChunkRecord {
            text: c.text.clone(),
            page_id: c.page_id,
            page_n: c.page_n,
            font_name: c.font_name.clone(),
            size: c.font_size,
            bbox: c.bbox.to_array(),
            column: c.column,
            fragments: c.fragments.clone(),
            annotations: c.annotations.clone(),
            extra: BTreeMap::new(),
        }
    }
}

impl From<ChunkRecord> for DocChunk {
    fn from(r: ChunkRecord) -> Self {
        DocChunk {
            page_id: r.page_id,
            column: r.column,
            bbox: BoundingBox::from_array(r.bbox),
            text: r.text,
            font_name: r.font_name,
            font_size: r.size,
            fragments: r.fragments,
            annotations: r.annotations,
            page_n: r.page_n,
        }
    }
}

/// Serialize chunks into the record array written to disk.
pub fn chunks_to_records(chunks: &[DocChunk]) -> Vec<ChunkRecord> {
    chunks.iter().map(ChunkRecord::from).collect()
}

/// Rebuild chunks from loaded records.
pub fn records_to_chunks(records: Vec<ChunkRecord>) -> Vec<DocChunk> {
    records.into_iter().map(DocChunk::from).collect()
}
