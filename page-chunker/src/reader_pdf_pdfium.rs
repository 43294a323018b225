//! PDFium-backed layout source. Behind feature `pdfium`.

#![cfg(feature = "pdfium")]

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;

use crate::layout::{LayoutItem, LayoutPage, LayoutTextBox, LayoutTextLine};
use crate::reader_layout::{LayoutSource, PageVisitor};
use crate::ChunkerError;

/// Vertical baseline drift, as a fraction of the font size, still counted as the same line.
const BASELINE_TOLERANCE: f64 = 0.5;
/// Horizontal gap, as a fraction of the font size, that is reported as an inferred space.
const WORD_GAP: f64 = 0.25;

fn bind_pdfium_from_env() -> Option<Box<dyn PdfiumLibraryBindings>> {
    // Prefer explicit full library path
    if let Ok(path) = std::env::var("PDFIUM_DLL_PATH") {
        let pb = PathBuf::from(path);
        let lib_path = if pb.is_dir() {
            Pdfium::pdfium_platform_library_name_at_path(&pb)
        } else {
            pb
        };
        if let Ok(b) = Pdfium::bind_to_library(&lib_path) { return Some(b); }
    }
    // Common alternative env var that points to a dir
    if let Ok(dir) = std::env::var("PDFIUM_DIR") {
        let pb = PathBuf::from(dir);
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(&pb);
        if let Ok(b) = Pdfium::bind_to_library(&lib_path) { return Some(b); }
    }
    None
}

fn bind_pdfium() -> Result<Pdfium, ChunkerError> {
    let bindings = match bind_pdfium_from_env() {
        Some(b) => b,
        None => Pdfium::bind_to_system_library()
            .map_err(|err| ChunkerError::Decode(format!("[pdfium] failed to bind: {}", err)))?,
    };
    Ok(Pdfium::new(bindings))
}

/// Decodes a PDF page by page and rebuilds text lines from PDFium's character stream.
#[derive(Debug, Clone)]
pub struct PdfiumLayoutSource {
    path: PathBuf,
}

impl PdfiumLayoutSource {
    pub fn new(path: &Path) -> Self { Self { path: path.to_path_buf() } }
}

impl LayoutSource for PdfiumLayoutSource {
    fn name(&self) -> &'static str { "pdfium" }

    fn visit_pages(&self, visit: &mut PageVisitor<'_>) -> Result<(), ChunkerError> {
        let pdfium = bind_pdfium()?;
        let document = pdfium
            .load_pdf_from_file(&self.path, None)
            .map_err(|err| ChunkerError::Decode(format!("[pdfium] failed to open PDF: {}", err)))?;

        for (idx, page) in document.pages().iter().enumerate() {
            let text = page
                .text()
                .map_err(|err| ChunkerError::Decode(format!("[pdfium] page {}: {}", idx, err)))?;
            let mut glyphs = Vec::new();
            for ch in text.chars().iter() {
                let Some(s) = ch.unicode_string() else { continue };
                let Ok(bounds) = ch.loose_bounds() else { continue };
                glyphs.push(RawGlyph {
                    text: s,
                    font_name: ch.font_name(),
                    size: ch.scaled_font_size().value as f64,
                    bbox: [
                        bounds.left.value as f64,
                        bounds.bottom.value as f64,
                        bounds.right.value as f64,
                        bounds.top.value as f64,
                    ],
                });
            }
            let layout = LayoutPage {
                index: idx as u32,
                boxes: vec![LayoutTextBox { lines: group_lines(&glyphs) }],
            };
            if let ControlFlow::Break(()) = visit(layout)? {
                break;
            }
        }
        Ok(())
    }
}

// --- Line reconstruction ------------------------------------------------------

struct RawGlyph {
    text: String,
    font_name: String,
    size: f64,
    bbox: [f64; 4],
}

struct LineBuilder {
    bbox: [f64; 4],
    baseline: f64,
    right: f64,
    items: Vec<LayoutItem>,
}

impl LineBuilder {
    fn start(g: &RawGlyph) -> Self {
        Self { bbox: g.bbox, baseline: g.bbox[1], right: g.bbox[2], items: Vec::new() }
    }

    fn push(&mut self, g: &RawGlyph) {
        self.bbox[0] = self.bbox[0].min(g.bbox[0]);
        self.bbox[1] = self.bbox[1].min(g.bbox[1]);
        self.bbox[2] = self.bbox[2].max(g.bbox[2]);
        self.bbox[3] = self.bbox[3].max(g.bbox[3]);
        self.right = g.bbox[2];
        self.items.push(LayoutItem::glyph(g.text.clone(), g.font_name.clone(), g.size));
    }

    fn finish(self) -> LayoutTextLine { LayoutTextLine { bbox: self.bbox, items: self.items } }
}

/// Group characters (in content order) into lines: a line ends at an explicit line break,
/// when the baseline moves, or when the pen jumps back to the left.
fn group_lines(glyphs: &[RawGlyph]) -> Vec<LayoutTextLine> {
    let mut lines = Vec::new();
    let mut current: Option<LineBuilder> = None;

    for g in glyphs {
        if g.text == "\n" || g.text == "\r" || g.text == "\r\n" {
            if let Some(line) = current.take() {
                lines.push(line.finish());
            }
            continue;
        }
        let blank = g.text.trim().is_empty();
        let tolerance = g.size.max(1.0);
        if let Some(line) = current.as_mut() {
            let moved = (g.bbox[1] - line.baseline).abs() > tolerance * BASELINE_TOLERANCE;
            let went_back = g.bbox[0] + tolerance < line.right;
            if !blank && (moved || went_back) {
                if let Some(done) = current.take() {
                    lines.push(done.finish());
                }
            }
        }
        match current.as_mut() {
            None => {
                if blank {
                    continue;
                }
                let mut line = LineBuilder::start(g);
                line.push(g);
                current = Some(line);
            }
            Some(line) if blank => {
                // Spaces carry degenerate bounds; keep the text but not the geometry.
                line.items.push(LayoutItem::glyph(g.text.clone(), g.font_name.clone(), g.size));
            }
            Some(line) => {
                let after_space = line.items.last().map(|i| i.text().trim().is_empty()).unwrap_or(false);
                if !after_space && g.bbox[0] - line.right > tolerance * WORD_GAP {
                    line.items.push(LayoutItem::anno(" "));
                }
                line.push(g);
            }
        }
    }
    if let Some(line) = current {
        lines.push(line.finish());
    }
    lines
}
