use chunk_model::DocChunk;

use crate::ChunkerError;

/// Assign `page_n` to every chunk on `page_id` from the page's trailing text.
pub fn set_all_page_numbers(chunks: &mut [DocChunk], page_id: u32, page_number_str: &str) -> Result<(), ChunkerError> {
    let page_n: i64 = page_number_str.trim().parse().map_err(|_| ChunkerError::PageNumberUnknown {
        page_id,
        text: page_number_str.to_string(),
    })?;
    for chunk in chunks.iter_mut().filter(|c| c.page_id == page_id) {
        chunk.page_n = Some(page_n);
    }
    Ok(())
}

/// Infer the printed page number of every physical page.
///
/// The last chunk of a page (in reading order) is assumed to be its visible page number.
/// `chunks` must already be sorted by [`crate::ordering::sort_chunks`].
pub fn resolve_page_numbers(chunks: &mut [DocChunk]) -> Result<(), ChunkerError> {
    for i in 1..chunks.len() {
        if chunks[i - 1].page_id != chunks[i].page_id {
            let page_id = chunks[i - 1].page_id;
            let text = chunks[i - 1].text.clone();
            set_all_page_numbers(chunks, page_id, &text)?;
        }
    }
    if let Some(last) = chunks.last() {
        let page_id = last.page_id;
        let text = last.text.clone();
        set_all_page_numbers(chunks, page_id, &text)?;
    }
    Ok(())
}
