pub mod aggregator;
pub mod chunk_cache;
pub mod config;
pub mod fragments;
pub mod layout;
pub mod ordering;
pub mod page_numbers;
pub mod reader_layout;
#[cfg(feature = "pdfium")] pub mod reader_pdf_pdfium;

use std::ops::ControlFlow;

use chunk_model::DocChunk;

pub use aggregator::{ColumnLayout, PageAggregator};
pub use config::{ChunkingParams, CHUNKING_DEFAULTS};
pub use reader_layout::{default_backend, open_source, LayoutBackend, LayoutJsonSource, LayoutSource};

#[derive(Debug, thiserror::Error)]
pub enum ChunkerError {
    #[error("only 1 or 2 column starts are supported, got {0}")]
    ColumnConfig(usize),
    #[error("the page number for page id {page_id} is unknown since the last text on the page is not an integer: \"{text}\"")]
    PageNumberUnknown { page_id: u32, text: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode every page of `source` into chunks in reading order, with printed page numbers.
///
/// Pages are aggregated one at a time; nothing is returned if any page fails.
pub fn generate_chunks(source: &dyn LayoutSource, params: &ChunkingParams) -> Result<Vec<DocChunk>, ChunkerError> {
    let mut aggregator = PageAggregator::new(&params.col_starts)?;
    log::info!("decoding with {}", source.name());

    source.visit_pages(&mut |page| {
        if params.page_id.is_some_and(|only| only != page.index) {
            return Ok(ControlFlow::Continue(()));
        }
        log_progress(page.index, params.max_page_id);
        aggregator.receive_layout(&page);
        if params.page_id.is_some() {
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    })?;

    log::info!("decoded {} page(s)", aggregator.pages_seen());
    let mut chunks = aggregator.into_chunks();
    ordering::sort_chunks(&mut chunks);
    page_numbers::resolve_page_numbers(&mut chunks)?;
    Ok(chunks)
}

fn log_progress(page_index: u32, max_page_id: Option<u32>) {
    match max_page_id {
        Some(max) if max > 0 => {
            let percent = (page_index as f64 / max as f64 * 100.0) as u32;
            log::debug!("Reading pageid {}/{} ({}%)", page_index, max, percent);
        }
        _ => log::debug!("Reading pageid {}", page_index),
    }
}
