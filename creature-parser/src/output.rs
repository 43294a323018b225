//! JSON and CSV renderings of the finalized creature list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::record::FinalCreature;
use crate::ParseError;

/// Column order of `creatures.csv`. Fields outside this list are left out of the CSV.
pub const CSV_HEADERS: [&str; 19] = [
    "ClassName",
    "CR",
    "XP",
    "Languages",
    "Category",
    "Subcategory",
    "Armor Class",
    "pageN",
    "Hit Points",
    "Saving Throws",
    "Speed",
    "Skills",
    "Senses",
    "STR",
    "CHA",
    "CON",
    "DEX",
    "WIS",
    "INT",
];

pub fn creatures_to_json(creatures: &[FinalCreature]) -> Result<String, ParseError> {
    Ok(serde_json::to_string_pretty(creatures)?)
}

/// Missing fields become empty cells.
pub fn creatures_to_csv(creatures: &[FinalCreature]) -> Result<String, ParseError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for creature in creatures {
        writer.write_record(CSV_HEADERS.iter().map(|h| creature.field(h).unwrap_or_default()))?;
    }
    let bytes = writer.into_inner().map_err(|e| ParseError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ParseError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Write `creatures.json` and `creatures.csv` into `dir`.
///
/// Both documents are rendered before either file is touched, and a failed CSV write
/// removes the JSON file again.
pub fn write_outputs(dir: &Path, creatures: &[FinalCreature]) -> Result<(PathBuf, PathBuf), ParseError> {
    let json = creatures_to_json(creatures)?;
    let csv = creatures_to_csv(creatures)?;
    fs::create_dir_all(dir)?;
    let json_path = dir.join("creatures.json");
    let csv_path = dir.join("creatures.csv");
    fs::write(&json_path, json)?;
    if let Err(err) = fs::write(&csv_path, csv) {
        // Never leave one artifact without the other.
        if let Err(cleanup) = fs::remove_file(&json_path) {
            log::warn!("could not remove \"{}\": {}", json_path.display(), cleanup);
        }
        return Err(err.into());
    }
    log::info!("saved \"{}\"", json_path.display());
    log::info!("saved \"{}\"", csv_path.display());
    Ok((json_path, csv_path))
}
