use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level creature grouping of the rulebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Monster,
    Creature,
    #[serde(rename = "NPC")]
    Npc,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Monster, Category::Creature, Category::Npc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Monster => "Monster",
            Category::Creature => "Creature",
            Category::Npc => "NPC",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Text that marks a section boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Fires on every chunk containing the substring.
    Single(String),
    /// Each part must be found once, in order, across consecutive chunks; fires when the
    /// last part is found. Section headers are split over several differently styled
    /// chunks, so one substring is not enough to identify them.
    Sequence(Vec<String>),
}

impl Marker {
    pub fn single(s: &str) -> Self { Marker::Single(s.to_string()) }

    pub fn sequence(parts: &[&str]) -> Self { Marker::Sequence(parts.iter().map(|s| s.to_string()).collect()) }
}

/// Match progress of one [`Marker`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerProgress {
    count: usize,
}

impl MarkerProgress {
    /// Feed one chunk's text; returns true when the marker is complete on this chunk.
    pub fn advance(&mut self, marker: &Marker, text: &str) -> bool {
        match marker {
            Marker::Single(needle) => {
                if text.contains(needle.as_str()) {
                    self.count += 1;
                    return true;
                }
                false
            }
            Marker::Sequence(parts) => match parts.get(self.count) {
                Some(next) if text.contains(next.as_str()) => {
                    self.count += 1;
                    self.count == parts.len()
                }
                _ => false,
            },
        }
    }
}

/// Start and end markers of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMarks {
    pub category: Category,
    pub start: Marker,
    pub end: Marker,
}

impl CategoryMarks {
    pub fn new(category: Category, start: Marker, end: Marker) -> Self {
        Self { category, start, end }
    }

    /// Section boundaries of the SRD 5.1, in evaluation order.
    pub fn srd_5_1() -> Vec<CategoryMarks> {
        vec![
            CategoryMarks::new(Category::Monster, Marker::single("Monsters (A)"), Marker::single("Appendix PH-A:")),
            CategoryMarks::new(
                Category::Creature,
                Marker::sequence(&["Appendix MM-A:", "Miscellaneous", "Creatures"]),
                Marker::single("Appendix MM-B:"),
            ),
            CategoryMarks::new(
                Category::Npc,
                Marker::sequence(&["Appendix MM-B:", "Nonplayer", "Characters"]),
                Marker::sequence(&["5.1", "403"]),
            ),
        ]
    }
}
