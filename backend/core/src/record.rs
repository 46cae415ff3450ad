use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nutrient::Nutrient;

/// Daily-value percentages recovered from a label.
///
/// Either both fields are known or the whole sub-record is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyValue {
    #[serde(rename = "Total Fat %")]
    pub total_fat_percent: i64,
    #[serde(rename = "Total Carbohydrate %")]
    pub total_carbohydrate_percent: i64,
}

/// Structured nutrition facts extracted from one block of label text.
///
/// Values are the numeric substrings exactly as recognized. Only nutrients
/// that were found have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionRecord {
    #[serde(flatten)]
    pub nutrients: BTreeMap<Nutrient, String>,
    #[serde(
        rename = "Daily Value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub daily_value: Option<DailyValue>,
}

impl NutritionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, replacing any previous one for the same nutrient.
    pub fn insert(&mut self, nutrient: Nutrient, value: impl Into<String>) -> Option<String> {
        self.nutrients.insert(nutrient, value.into())
    }

    pub fn get(&self, nutrient: Nutrient) -> Option<&str> {
        self.nutrients.get(&nutrient).map(String::as_str)
    }

    pub fn contains(&self, nutrient: Nutrient) -> bool {
        self.nutrients.contains_key(&nutrient)
    }

    /// Entries in label order.
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &str)> {
        self.nutrients.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Number of nutrients found, not counting the daily-value sub-record.
    pub fn len(&self) -> usize {
        self.nutrients.len()
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty() && self.daily_value.is_none()
    }
}
