use chunk_model::DocChunk;

/// Put chunks in reading order: page, then column, then top-to-bottom.
///
/// The sort is stable so lines sharing a top edge keep their decode order.
pub fn sort_chunks(chunks: &mut [DocChunk]) {
    chunks.sort_by(|a, b| {
        a.page_id
            .cmp(&b.page_id)
            .then(a.column.cmp(&b.column))
            .then(b.bbox.top().total_cmp(&a.bbox.top()))
    });
}

/// True when `chunks` already satisfies the reading order of [`sort_chunks`].
pub fn is_reading_order(chunks: &[DocChunk]) -> bool {
    chunks.windows(2).all(|w| {
        let (a, b) = (&w[0], &w[1]);
        (a.page_id, a.column) < (b.page_id, b.column)
            || ((a.page_id, a.column) == (b.page_id, b.column) && a.bbox.top() >= b.bbox.top())
    })
}
