use chunk_model::{clean_text, Annotation, BoundingBox, DocChunk, Fragment};

use crate::fragments::group_fragments;
use crate::layout::{LayoutItem, LayoutPage, LayoutTextLine};
use crate::ordering::sort_chunks;
use crate::ChunkerError;

/// How text lines are assigned to columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnLayout {
    Single,
    /// Lines whose left edge is at or after `threshold` belong to column 1.
    Two { threshold: f64 },
}

impl ColumnLayout {
    /// Build from the left edges of each column. Only one or two columns are supported.
    pub fn from_col_starts(col_starts: &[f64]) -> Result<Self, ChunkerError> {
        match col_starts {
            [_] => Ok(ColumnLayout::Single),
            [_, second] => Ok(ColumnLayout::Two { threshold: second.floor() }),
            _ => Err(ChunkerError::ColumnConfig(col_starts.len())),
        }
    }

    pub fn column_for(&self, left: f64) -> u8 {
        match *self {
            ColumnLayout::Single => 0,
            ColumnLayout::Two { threshold } => u8::from(left >= threshold),
        }
    }
}

/// Turns decoded pages into chunks, one per non-empty text line.
///
/// Each aggregator owns its accumulator, so converting two documents needs two aggregators.
#[derive(Debug, Clone)]
pub struct PageAggregator {
    columns: ColumnLayout,
    chunks: Vec<DocChunk>,
    page_number: u32,
}

impl PageAggregator {
    pub fn new(col_starts: &[f64]) -> Result<Self, ChunkerError> {
        let columns = ColumnLayout::from_col_starts(col_starts)?;
        log::debug!("columns: {}", col_starts.len());
        Ok(Self { columns, chunks: Vec::new(), page_number: 0 })
    }

    /// Number of pages received so far.
    pub fn pages_seen(&self) -> u32 { self.page_number }

    pub fn chunks(&self) -> &[DocChunk] { &self.chunks }

    pub fn into_chunks(self) -> Vec<DocChunk> { self.chunks }

    /// Accumulate one decoded page. The page gets the next physical page id and the
    /// accumulator is re-sorted into reading order afterwards.
    pub fn receive_layout(&mut self, page: &LayoutPage) {
        let page_id = self.page_number;
        for text_box in &page.boxes {
            for line in &text_box.lines {
                if let Some(chunk) = self.render_line(page_id, line) {
                    self.chunks.push(chunk);
                }
            }
        }
        self.page_number += 1;
        sort_chunks(&mut self.chunks);
    }

    fn render_line(&self, page_id: u32, line: &LayoutTextLine) -> Option<DocChunk> {
        let mut raw = String::new();
        let mut font_name: Option<&str> = None;
        let mut font_size: Option<f64> = None;
        let mut mixed = false;
        let mut fragments = Vec::new();
        let mut annotations = Vec::new();

        for item in &line.items {
            match item {
                LayoutItem::Glyph { text, font_name: name, size } => {
                    raw.push_str(text);
                    if font_name.is_some_and(|prev| prev != name.as_str()) || font_size.is_some_and(|prev| prev != *size) {
                        mixed = true;
                    }
                    font_name = Some(name.as_str());
                    font_size = Some(*size);
                    fragments.push(Fragment::new(text.clone(), name.clone(), *size));
                }
                LayoutItem::Anno { text, extra } => {
                    raw.push_str(text);
                    annotations.push(Annotation { text: text.clone(), extra: extra.clone() });
                }
            }
        }

        let text = clean_text(&raw);
        if text.is_empty() {
            return None;
        }
        let bbox = BoundingBox::from_array(line.bbox);
        let mut chunk = DocChunk::new(page_id, self.columns.column_for(bbox.left()), bbox, text);
        if !mixed {
            chunk.font_name = font_name.map(str::to_string);
            chunk.font_size = font_size;
        }
        chunk.fragments = fragments;
        chunk.annotations = annotations;
        group_fragments(&mut chunk);
        Some(chunk)
    }
}
