//! Stat-block reconstruction from the ordered chunk stream.
//!
//! The source has no grammar; structure is recovered from font identity (see
//! [`crate::style`]) and from section marker text (see [`crate::markers`]).

use std::collections::HashSet;

use chunk_model::DocChunk;

use crate::challenge::no_parens;
use crate::config::ParserConfig;
use crate::markers::{Category, MarkerProgress};
use crate::record::CreatureRecord;
use crate::style::StyleRole;
use crate::ParseError;

/// Nesting level of a log line; the parser passes it explicitly instead of keeping
/// an indentation string around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogScope {
    Section,
    Subcategory,
    Creature,
    Detail,
}

impl LogScope {
    pub fn pad(self) -> &'static str {
        match self {
            LogScope::Section => "",
            LogScope::Subcategory => "  ",
            LogScope::Creature => "    ",
            LogScope::Detail => "      ",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct MarkState {
    start: MarkerProgress,
    end: MarkerProgress,
}

/// State machine that turns chunks (in reading order) into creature records.
#[derive(Debug, Clone)]
pub struct StatBlockParser<'a> {
    config: &'a ParserConfig,
    marks: Vec<MarkState>,
    category: Option<Category>,
    subcategory: Option<String>,
    creature: Option<CreatureRecord>,
    /// Stat header whose value is expected in the next chunk.
    pending_stat: Option<String>,
    /// Subcategory end pages whose first creature was already seen.
    cleared_pages: HashSet<i64>,
    sealed: Vec<CreatureRecord>,
}

impl<'a> StatBlockParser<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            marks: vec![MarkState::default(); config.categories.len()],
            category: None,
            subcategory: None,
            creature: None,
            pending_stat: None,
            cleared_pages: HashSet::new(),
            sealed: Vec::new(),
        }
    }

    pub fn category(&self) -> Option<Category> { self.category }

    pub fn subcategory(&self) -> Option<&str> { self.subcategory.as_deref() }

    pub fn active_creature(&self) -> Option<&CreatureRecord> { self.creature.as_ref() }

    pub fn pending_stat(&self) -> Option<&str> { self.pending_stat.as_deref() }

    pub fn sealed(&self) -> &[CreatureRecord] { &self.sealed }

    /// Consume one chunk.
    pub fn feed(&mut self, chunk: &DocChunk) -> Result<(), ParseError> {
        self.apply_category_marks(chunk)?;
        let Some(category) = self.category else {
            return Ok(());
        };
        self.apply_subcategory_end_phrases(chunk);
        self.dispatch(chunk, category)
    }

    /// Seal the creature still in progress and return every sealed record in order.
    pub fn finish(mut self) -> Vec<CreatureRecord> {
        self.seal_creature();
        self.sealed
    }

    fn seal_creature(&mut self) {
        if let Some(creature) = self.creature.take() {
            self.sealed.push(creature);
        }
    }

    fn apply_category_marks(&mut self, chunk: &DocChunk) -> Result<(), ParseError> {
        let config = self.config;
        let mut started: Option<Category> = None;

        // End before start: the heading that starts one section may also end another.
        for (marks, state) in config.categories.iter().zip(self.marks.iter_mut()) {
            if state.end.advance(&marks.end, &chunk.text) {
                if let Some(creature) = self.creature.take() {
                    self.sealed.push(creature);
                }
                if self.category.is_some() {
                    log::info!("{}End of {} was inferred from {}", LogScope::Subcategory.pad(), marks.category, chunk);
                }
                self.category = None;
                self.subcategory = None;
                self.pending_stat = None;
            }
            if state.start.advance(&marks.start, &chunk.text) {
                started = Some(marks.category);
            }
        }

        if let Some(new_category) = started {
            match self.category {
                Some(active) if active != new_category => {
                    return Err(ParseError::OverlappingCategory { started: new_category, active });
                }
                Some(_) => {}
                None => {
                    log::info!("{}Category '{}' was inferred from {}", LogScope::Section.pad(), new_category, chunk);
                }
            }
            self.category = Some(new_category);
            self.subcategory = None;
        }
        Ok(())
    }

    /// Some subcategories end without a heading; a phrase in the next creature's
    /// type line is the only hint.
    fn apply_subcategory_end_phrases(&mut self, chunk: &DocChunk) {
        let Some(current) = self.subcategory.as_deref() else {
            return;
        };
        let ends = self
            .config
            .subcategory_end_phrases
            .iter()
            .any(|(name, phrase)| name == current && chunk.text.contains(phrase.as_str()));
        if !ends {
            return;
        }
        log::info!("{}End Subcategory {} since its end phrase was found in {}", LogScope::Subcategory.pad(), current, chunk);
        // The creature stays open: the phrase belongs to its stat block.
        if let Some(creature) = self.creature.as_mut() {
            creature.subcategory = None;
        }
        self.subcategory = None;
    }

    fn dispatch(&mut self, chunk: &DocChunk, category: Category) -> Result<(), ParseError> {
        let config = self.config;
        let styles = &config.styles;

        if let Some(stat_name) = self.pending_stat.take() {
            if config.last_ability() == Some(stat_name.as_str()) {
                return self.read_ability_row(chunk);
            }
            if !config.is_ability(&stat_name) {
                match self.creature.as_mut() {
                    Some(creature) => {
                        log::debug!("{}- found \"{}\"", LogScope::Detail.pad(), stat_name);
                        creature.set(stat_name, chunk.text.as_str());
                    }
                    None => log::warn!("A stat was not under a creature in \"{}\"", chunk.text),
                }
                return Ok(());
            }
            // Other ability headers only announce the combined row; classify this chunk normally.
        }

        if styles.one_style(chunk, StyleRole::CreatureName) {
            self.seal_creature();
            if let Some(page) = chunk.page_n {
                if config.subcategory_end_pages.contains(&page) && self.cleared_pages.insert(page) && self.subcategory.is_some() {
                    log::info!("{}End Subcategory at the first creature of p. {}", LogScope::Subcategory.pad(), page);
                    self.subcategory = None;
                }
            }
            log::info!("{}Name {}:", LogScope::Creature.pad(), chunk.text);
            self.creature = Some(CreatureRecord::new(chunk.text.clone(), category, self.subcategory.clone(), chunk.page_n));
        } else if styles.one_style(chunk, StyleRole::Subcategory) {
            // Seal first so a creature never leaks across the heading, whatever the heading means.
            self.seal_creature();
            let excluded = chunk.page_n.is_some_and(|p| config.non_subcategory_pages.contains(&p));
            if excluded {
                log::debug!("{}Heading {} is not a subcategory", LogScope::Subcategory.pad(), chunk);
                self.subcategory = None;
            } else {
                log::info!("{}Subcategory {}.{}", LogScope::Subcategory.pad(), category, chunk);
                self.subcategory = Some(chunk.text.clone());
            }
        } else if styles.start_style(chunk, StyleRole::StatLabel) {
            match self.creature.as_mut() {
                None => {
                    log::warn!("Unknown stat: \"{}\"", chunk.text);
                    log_fragments(chunk);
                }
                Some(creature) => {
                    let stat_name = chunk.fragments[0].text.clone();
                    if chunk.fragments.len() == 2 {
                        creature.set(stat_name, chunk.fragments[1].text.as_str());
                    } else {
                        self.pending_stat = Some(stat_name);
                    }
                }
            }
        } else if styles.start_style(chunk, StyleRole::SectionHeading) {
            self.seal_creature();
            self.subcategory = None;
            log::debug!("{}Section {}", LogScope::Section.pad(), chunk);
        } else if let Some(creature) = &self.creature {
            log::debug!("{}Unknown chunk in {}: \"{}\"", LogScope::Detail.pad(), creature.class_name, chunk.text);
            log_fragments(chunk);
        }
        Ok(())
    }

    /// The row after the last ability header: six "score (mod)" pairs.
    fn read_ability_row(&mut self, chunk: &DocChunk) -> Result<(), ParseError> {
        let config = self.config;
        let order = &config.ability_order;
        let Some(creature) = self.creature.as_mut() else {
            log::warn!("Ability scores were not under a creature in \"{}\"", chunk.text);
            return Ok(());
        };
        let name = creature.class_name.clone();
        let malformed = |reason: String| ParseError::MalformedAbilityRow {
            creature: name.clone(),
            text: chunk.text.clone(),
            reason,
        };

        let parts: Vec<&str> = chunk.text.split_whitespace().collect();
        if parts.len() != order.len() * 2 {
            return Err(malformed(format!(
                "expected {} parts (6 like \"stat (mod)\") but got {}",
                order.len() * 2,
                parts.len()
            )));
        }
        let mut values = Vec::with_capacity(order.len());
        for (header, pair) in order.iter().zip(parts.chunks(2)) {
            let score = parse_signed(pair[0]).map_err(&malformed)?;
            let modifier = parse_signed(no_parens(pair[1])).map_err(&malformed)?;
            values.push((header.clone(), score, modifier));
        }
        for (header, score, modifier) in values {
            creature.set(format!("{}Mod", header), modifier);
            creature.set(header, score);
        }
        log::debug!("{}- found stats", LogScope::Detail.pad());
        Ok(())
    }
}

/// Integer with an optional sign; the typographic minus (U+2212) counts as '-'.
fn parse_signed(s: &str) -> Result<i64, String> {
    s.replace('\u{2212}', "-")
        .parse::<i64>()
        .map_err(|e| format!("\"{}\": {}", s, e))
}

fn log_fragments(chunk: &DocChunk) {
    log::debug!("{}len(fragments): {}", LogScope::Detail.pad(), chunk.fragments.len());
    for frag in &chunk.fragments {
        log::debug!("{}- unknown fragment \"{}\"", LogScope::Detail.pad(), frag.text);
        log::debug!("{}  font: '{}' {}", LogScope::Detail.pad(), frag.font_name, frag.size);
    }
}

/// Run the parser over a whole chunk stream.
pub fn process_chunks(chunks: &[DocChunk], config: &ParserConfig) -> Result<Vec<CreatureRecord>, ParseError> {
    let mut parser = StatBlockParser::new(config);
    for chunk in chunks {
        parser.feed(chunk)?;
    }
    Ok(parser.finish())
}
