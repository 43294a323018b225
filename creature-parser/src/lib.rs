pub mod challenge;
pub mod config;
pub mod finalize;
pub mod markers;
pub mod output;
pub mod parser;
pub mod record;
pub mod style;

use chunk_model::DocChunk;

pub use challenge::{parse_challenge, ChallengeRating};
pub use config::{ParserConfig, SRD_DEFAULTS};
pub use finalize::finalize;
pub use markers::{Category, CategoryMarks, Marker, MarkerProgress};
pub use output::{creatures_to_csv, creatures_to_json, write_outputs, CSV_HEADERS};
pub use parser::{process_chunks, LogScope, StatBlockParser};
pub use record::{CreatureRecord, FinalCreature, StatValue};
pub use style::{StyleRole, StyleRule, StyleTable};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("\"{started}\" was found before \"{active}\" ended")]
    OverlappingCategory { started: Category, active: Category },
    #[error("bad ability scores for {creature} in \"{text}\": {reason}")]
    MalformedAbilityRow { creature: String, text: String, reason: String },
    #[error("bad challenge \"{raw}\": {reason}")]
    Challenge { raw: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Parse chunks (in reading order, with page numbers) into finalized creatures sorted by CR.
pub fn extract_creatures(chunks: &[DocChunk], config: &ParserConfig) -> Result<Vec<FinalCreature>, ParseError> {
    let records = process_chunks(chunks, config)?;
    log::info!("found {} creature(s)", records.len());
    finalize(records)
}
