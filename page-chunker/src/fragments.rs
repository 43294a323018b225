use chunk_model::{DocChunk, Fragment};

/// Combine fragments that are in a row and share the same font name and size.
///
/// Each finished fragment has its whitespace collapsed. Merging an already merged
/// list returns it unchanged.
pub fn merge_fragments(fragments: &[Fragment]) -> Vec<Fragment> {
    let mut out: Vec<Fragment> = Vec::new();
    let mut current: Option<Fragment> = None;

    for fragment in fragments {
        match current.as_mut() {
            Some(this) if this.same_style(fragment) => this.text.push_str(&fragment.text),
            _ => {
                if let Some(mut done) = current.take() {
                    done.clean();
                    out.push(done);
                }
                current = Some(fragment.clone());
            }
        }
    }
    if let Some(mut last) = current {
        last.clean();
        out.push(last);
    }
    out
}

/// Replace the chunk's per-glyph fragments with the merged runs.
pub fn group_fragments(chunk: &mut DocChunk) {
    chunk.fragments = merge_fragments(&chunk.fragments);
}
