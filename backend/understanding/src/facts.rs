//! Raw OCR text in, nutrition record out.

use nutrilens_core::NutritionRecord;
use tracing::debug;

use crate::clean::{clean, CleanedText};
use crate::daily_value::extract_daily_value;
use crate::extract::extract_nutrients;

/// A parsed label together with the cleaned text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAnalysis {
    pub cleaned: CleanedText,
    pub record: NutritionRecord,
}

/// Clean `raw`, extract every nutrient and the daily-value pair.
pub fn analyze_label(raw: &str) -> LabelAnalysis {
    let cleaned = clean(raw);
    let mut record = extract_nutrients(&cleaned);
    record.daily_value = extract_daily_value(&cleaned);

    debug!(
        raw_len = raw.len(),
        cleaned_len = cleaned.len(),
        nutrients = record.len(),
        daily_value = record.daily_value.is_some(),
        "Parsed nutrition facts"
    );

    LabelAnalysis { cleaned, record }
}

/// Parse nutrition facts out of raw recognized text. Never fails.
pub fn parse_nutrition_facts(raw: &str) -> NutritionRecord {
    analyze_label(raw).record
}
