//! Font-identity heuristics: which (font name, rounded size) pairs mean what.
//!
//! The table is the only place the parser learns about the source document's
//! typography; swapping it retargets the parser without touching its logic.

use chunk_model::{DocChunk, Fragment};

/// Semantic role of a text style in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRole {
    /// A creature's name, e.g. "Aboleth".
    CreatureName,
    /// A group heading such as "Dragons, Metallic".
    Subcategory,
    /// A stat field header such as "Armor Class" or "STR".
    StatLabel,
    /// A letter section heading such as "Monsters (B)".
    SectionHeading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub font_name: String,
    pub size: f64,
    pub role: StyleRole,
}

impl StyleRule {
    pub fn new(font_name: impl Into<String>, size: f64, role: StyleRole) -> Self {
        Self { font_name: font_name.into(), size, role }
    }
}

/// Maps (font name, size rounded to `decimal_places`) to a [`StyleRole`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    pub decimal_places: u32,
    pub rules: Vec<StyleRule>,
}

impl StyleTable {
    pub fn new(decimal_places: u32, rules: Vec<StyleRule>) -> Self {
        Self { decimal_places, rules }
    }

    /// Styles of the SRD 5.1 PDF.
    pub fn srd_5_1() -> Self {
        Self::new(
            2,
            vec![
                // Actually 16.139999999999986; rounding makes the literal match.
                StyleRule::new("WWROEK+Calibri-Bold", 16.1399, StyleRole::CreatureName),
                StyleRule::new("DXJJCX+GillSans-SemiBold", 16.60656, StyleRole::Subcategory),
                StyleRule::new("WWROEK+Calibri-Bold", 13.2348, StyleRole::StatLabel),
                StyleRule::new("DXJJCX+GillSans-SemiBold", 21.4740, StyleRole::SectionHeading),
            ],
        )
    }

    fn rounded(&self, size: f64) -> i64 {
        (size * 10f64.powi(self.decimal_places as i32)).round() as i64
    }

    /// Does `fragment` have the style registered for `role`?
    pub fn matches(&self, fragment: &Fragment, role: StyleRole) -> bool {
        let size = self.rounded(fragment.size);
        self.rules
            .iter()
            .filter(|r| r.role == role)
            .any(|r| r.font_name == fragment.font_name && self.rounded(r.size) == size)
    }

    /// The chunk consists of exactly one fragment, in the style of `role`.
    pub fn one_style(&self, chunk: &DocChunk, role: StyleRole) -> bool {
        match chunk.fragments.as_slice() {
            [only] => self.matches(only, role),
            _ => false,
        }
    }

    /// The chunk's first fragment is in the style of `role`.
    pub fn start_style(&self, chunk: &DocChunk, role: StyleRole) -> bool {
        chunk.fragments.first().is_some_and(|f| self.matches(f, role))
    }
}

impl Default for StyleTable {
    fn default() -> Self { Self::srd_5_1() }
}
