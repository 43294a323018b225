use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::markers::Category;

/// Value of one stat field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{}", v),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self { StatValue::Int(v) }
}

impl From<String> for StatValue {
    fn from(v: String) -> Self { StatValue::Text(v) }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self { StatValue::Text(v.to_string()) }
}

/// One creature as read from the document, before challenge parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    #[serde(rename = "ClassName")]
    pub class_name: String,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Subcategory")]
    pub subcategory: Option<String>,
    #[serde(rename = "pageN")]
    pub page_n: Option<i64>,
    /// Every other field header found in the stat block.
    #[serde(flatten)]
    pub stats: BTreeMap<String, StatValue>,
}

impl CreatureRecord {
    pub fn new(class_name: impl Into<String>, category: Category, subcategory: Option<String>, page_n: Option<i64>) -> Self {
        Self { class_name: class_name.into(), category, subcategory, page_n, stats: BTreeMap::new() }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StatValue>) {
        self.stats.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&StatValue> { self.stats.get(name) }

    /// Raw "challenge rating (XP)" text, if the stat block had one.
    pub fn challenge(&self) -> Option<&str> {
        match self.stats.get("Challenge") {
            Some(StatValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

/// A creature after finalization: challenge rating and XP split out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalCreature {
    #[serde(flatten)]
    pub record: CreatureRecord,
    /// Fraction string such as "1/2", or "-1" when the challenge is missing.
    #[serde(rename = "CR")]
    pub cr: String,
    #[serde(rename = "XP")]
    pub xp: i64,
}

impl FinalCreature {
    /// Value of a column by its output header name, if present.
    pub fn field(&self, header: &str) -> Option<String> {
        match header {
            "ClassName" => Some(self.record.class_name.clone()),
            "Category" => Some(self.record.category.to_string()),
            "Subcategory" => self.record.subcategory.clone(),
            "pageN" => self.record.page_n.map(|n| n.to_string()),
            "CR" => Some(self.cr.clone()),
            "XP" => Some(self.xp.to_string()),
            other => self.record.get(other).map(StatValue::to_string),
        }
    }
}
