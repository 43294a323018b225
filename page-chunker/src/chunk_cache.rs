//! `chunks.json`: decoded chunks cached between runs so the PDF is only decoded once.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chunk_model::{chunks_to_records, records_to_chunks, ChunkRecord, DocChunk};

use crate::ChunkerError;

/// Load cached chunks.
///
/// Returns `Ok(None)` when there is no cache, and also when the cache is unusable
/// (bad JSON, or a chunk without a resolved page number); an unusable file is deleted
/// so the caller decodes the document again.
pub fn load_chunks(path: &Path) -> Result<Option<Vec<DocChunk>>, ChunkerError> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    log::info!("* loading \"{}\"", path.display());

    let problem = match serde_json::from_str::<Vec<ChunkRecord>>(&raw) {
        Ok(records) => match records.iter().position(|r| r.page_n.is_none()) {
            None => return Ok(Some(records_to_chunks(records))),
            Some(i) => format!("chunk {} (\"{}\") has no pageN", i, records[i].text),
        },
        Err(err) => err.to_string(),
    };

    log::warn!("{}", problem);
    log::warn!("  * deleting bad \"{}\"", path.display());
    fs::remove_file(path)?;
    Ok(None)
}

/// Write chunks as a pretty-printed array of records.
pub fn save_chunks(path: &Path, chunks: &[DocChunk]) -> Result<(), ChunkerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&chunks_to_records(chunks))?;
    fs::write(path, json)?;
    log::info!("  * saved \"{}\"", path.display());
    Ok(())
}
