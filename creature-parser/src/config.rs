use crate::markers::CategoryMarks;
use crate::style::StyleTable;

/// Document-specific constants of the SRD 5.1 (page numbers are printed numbers).
#[derive(Debug, Clone, Copy)]
pub struct SrdDefaults {
    /// Pages where the subcategory heading style is used for other headings. Those
    /// headings still end the previous subcategory.
    pub non_subcategory_pages: &'static [i64],
    /// The first creature on each of these pages is not in a subcategory.
    pub subcategory_end_pages: &'static [i64],
    /// Subcategories that end without a heading, detected by a phrase from the
    /// first creature after them.
    pub subcategory_end_phrases: &'static [(&'static str, &'static str)],
    /// Order in which the ability score row is read.
    pub ability_order: [&'static str; 6],
}

pub const SRD_DEFAULTS: SrdDefaults = SrdDefaults {
    non_subcategory_pages: &[320, 395],
    subcategory_end_pages: &[332, 336, 339],
    subcategory_end_phrases: &[
        ("Animated Objects", "monstrosity,"),
        ("Dinosaurs", "monstrosity ("),
        ("Dragons, Metallic", "monstrosity,"),
        ("Elementals", "humanoid ("),
        ("Genies", "undead,"),
        ("Giants", "aberration,"),
        ("Golems", "monstrosity,"),
        ("Skeletons", "chaotic evil"),
        ("Sphinxes", "fey,"),
    ],
    ability_order: ["STR", "CHA", "CON", "DEX", "WIS", "INT"],
};

/// Everything the stat-block parser knows about the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    pub styles: StyleTable,
    /// Evaluated in order for every chunk.
    pub categories: Vec<CategoryMarks>,
    pub non_subcategory_pages: Vec<i64>,
    pub subcategory_end_pages: Vec<i64>,
    pub subcategory_end_phrases: Vec<(String, String)>,
    /// Six ability headers; the last one is followed by the combined value row.
    pub ability_order: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            styles: StyleTable::srd_5_1(),
            categories: CategoryMarks::srd_5_1(),
            non_subcategory_pages: SRD_DEFAULTS.non_subcategory_pages.to_vec(),
            subcategory_end_pages: SRD_DEFAULTS.subcategory_end_pages.to_vec(),
            subcategory_end_phrases: SRD_DEFAULTS
                .subcategory_end_phrases
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ability_order: SRD_DEFAULTS.ability_order.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    pub fn is_ability(&self, name: &str) -> bool { self.ability_order.iter().any(|a| a == name) }

    /// The header that precedes the combined ability row.
    pub fn last_ability(&self) -> Option<&str> { self.ability_order.last().map(String::as_str) }
}
