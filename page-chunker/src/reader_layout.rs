use std::fs;
use std::ops::ControlFlow;
use std::path::Path;

use crate::layout::LayoutPage;
use crate::ChunkerError;

/// Visitor called once per decoded page; `Break` stops decoding early.
pub type PageVisitor<'a> = dyn FnMut(LayoutPage) -> Result<ControlFlow<()>, ChunkerError> + 'a;

/// Anything that can decode a document into per-page layout trees, in document order.
pub trait LayoutSource {
    fn name(&self) -> &'static str;
    fn visit_pages(&self, visit: &mut PageVisitor<'_>) -> Result<(), ChunkerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutBackend {
    /// Pre-decoded layout dump (JSON array of pages).
    Json,
    Pdfium,
}

/// Select the default backend based on enabled cargo features.
pub fn default_backend() -> LayoutBackend {
    if cfg!(feature = "pdfium") { LayoutBackend::Pdfium } else { LayoutBackend::Json }
}

/// Open `path` with the requested backend.
pub fn open_source(path: &Path, backend: LayoutBackend) -> Result<Box<dyn LayoutSource>, ChunkerError> {
    match backend {
        LayoutBackend::Json => Ok(Box::new(LayoutJsonSource::open(path)?)),
        LayoutBackend::Pdfium => open_pdfium(path),
    }
}

#[cfg(feature = "pdfium")]
fn open_pdfium(path: &Path) -> Result<Box<dyn LayoutSource>, ChunkerError> {
    Ok(Box::new(crate::reader_pdf_pdfium::PdfiumLayoutSource::new(path)))
}

#[cfg(not(feature = "pdfium"))]
fn open_pdfium(path: &Path) -> Result<Box<dyn LayoutSource>, ChunkerError> {
    Err(ChunkerError::Decode(format!(
        "pdfium backend not enabled; cannot decode {}",
        path.display()
    )))
}

// --- JSON layout dumps --------------------------------------------------------

/// Layout pages previously dumped by an external decoder.
#[derive(Debug, Clone)]
pub struct LayoutJsonSource {
    pages: Vec<LayoutPage>,
}

impl LayoutJsonSource {
    pub fn open(path: &Path) -> Result<Self, ChunkerError> {
        let raw = fs::read_to_string(path)?;
        let pages: Vec<LayoutPage> = serde_json::from_str(&raw)?;
        log::debug!("{} layout page(s) in \"{}\"", pages.len(), path.display());
        Ok(Self { pages })
    }

    pub fn from_pages(pages: Vec<LayoutPage>) -> Self {
        Self { pages }
    }
}

impl LayoutSource for LayoutJsonSource {
    fn name(&self) -> &'static str { "layout-json" }

    fn visit_pages(&self, visit: &mut PageVisitor<'_>) -> Result<(), ChunkerError> {
        for page in &self.pages {
            if visit(page.clone())?.is_break() {
                break;
            }
        }
        Ok(())
    }
}
