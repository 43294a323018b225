/// Default chunking settings for the SRD 5.1 layout.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingDefaults {
    pub col_starts: [f64; 2],
    pub max_page_id: u32,
    pub chunks_file_name: &'static str,
}

/// Shared defaults so the CLI and tests stay in sync.
pub const CHUNKING_DEFAULTS: ChunkingDefaults = ChunkingDefaults {
    col_starts: [57.6, 328.56],
    max_page_id: 1694,
    chunks_file_name: "chunks.json",
};

/// Settings for [`crate::generate_chunks`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkingParams {
    /// Left edge of each column; one or two entries.
    pub col_starts: Vec<f64>,
    /// Only used to print a progress percentage.
    pub max_page_id: Option<u32>,
    /// Restrict decoding to a single source page (debugging).
    pub page_id: Option<u32>,
}

impl Default for ChunkingParams {
    fn default() -> Self {
        Self {
            col_starts: CHUNKING_DEFAULTS.col_starts.to_vec(),
            max_page_id: Some(CHUNKING_DEFAULTS.max_page_id),
            page_id: None,
        }
    }
}
