//! Nutrient extractor: runs every catalog pattern over cleaned text.

use nutrilens_core::NutritionRecord;

use crate::catalog::catalog;
use crate::clean::CleanedText;

/// Pull every nutrient the catalog can find out of `text`.
///
/// Each pattern is an independent search; the first match wins. A match whose
/// capture is empty counts as not found. Values are stored verbatim.
pub fn extract_nutrients(text: &CleanedText) -> NutritionRecord {
    let mut record = NutritionRecord::new();

    for (nutrient, re) in catalog() {
        let Some(caps) = re.captures(text.as_str()) else {
            continue;
        };
        if let Some(value) = caps.get(1).filter(|m| !m.as_str().is_empty()) {
            record.insert(*nutrient, value.as_str());
        }
    }

    record
}
