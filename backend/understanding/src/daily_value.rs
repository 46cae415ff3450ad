//! Daily-value heuristic.
//!
//! Labels print the %DV column next to each nutrient. Only two of them are
//! recovered, and purely by position: the first `<number>%` in the text is
//! taken as total fat, the second as total carbohydrate. Any percentage that
//! appears earlier (a vitamin's %DV, "100% juice") shifts both.

use nutrilens_core::DailyValue;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::clean::CleanedText;

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)%").unwrap());

/// Every `<number>%` in `text`, left to right, as the digit substrings.
pub fn percentages(text: &CleanedText) -> Vec<&str> {
    PERCENT_RE
        .captures_iter(text.as_str())
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Recover the total-fat and total-carbohydrate %DV by position.
///
/// Returns `None` unless at least two percentages are present.
pub fn extract_daily_value(text: &CleanedText) -> Option<DailyValue> {
    let found = percentages(text);
    let [fat, carbs, ..] = found.as_slice() else {
        return None;
    };
    Some(DailyValue {
        total_fat_percent: parse_percent(fat),
        total_carbohydrate_percent: parse_percent(carbs),
    })
}

/// Digit runs too long for `i64` clamp to `i64::MAX`.
fn parse_percent(digits: &str) -> i64 {
    digits.parse().unwrap_or(i64::MAX)
}
