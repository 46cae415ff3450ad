//! Nutrient pattern catalog.
//!
//! One pattern per nutrient, each with exactly one capture group for the
//! numeric value. Unit suffixes (`g`, `mg`) are part of the pattern, never of
//! the capture. Micronutrient patterns capture `\d*` and frequently match with
//! an empty value; the extractor drops those.

use nutrilens_core::Nutrient;
use once_cell::sync::Lazy;
use regex::Regex;

/// The nutrient → pattern table, in label order.
pub const NUTRIENT_PATTERNS: [(Nutrient, &str); 25] = [
    (Nutrient::Calories, r"calories\s+(\d+)"),
    (Nutrient::TotalFat, r"total\s+fat\s+(\d+)g"),
    (Nutrient::SaturatedFat, r"saturated\s+fat\s+(\d+)g"),
    (Nutrient::TransFat, r"trans\s+fat\s+(\d+)g"),
    (Nutrient::PolyunsaturatedFat, r"polyunsaturated\s+fat\s+(\d+\.?\d*)g"),
    (Nutrient::MonounsaturatedFat, r"monounsaturated\s+fat\s+(\d+\.?\d*)g"),
    (Nutrient::Cholesterol, r"cholesterol\s+(\d+)mg"),
    (Nutrient::Sodium, r"sodium\s+(\d+)mg"),
    (Nutrient::Potassium, r"potassium\s+(\d+)mg"),
    (Nutrient::TotalCarbohydrate, r"total\s+carbohydrate\s+(\d+)g"),
    (Nutrient::DietaryFiber, r"dietary\s+fiber\s+(\d+)g"),
    (Nutrient::Sugars, r"sugars\s+(\d+)g"),
    (Nutrient::Protein, r"protein\s+(\d+)g"),
    (Nutrient::VitaminA, r"vitamin\s+a\s+(\d*)"),
    (Nutrient::VitaminC, r"vitamin\s+c\s+(\d*)"),
    (Nutrient::Calcium, r"calcium\s+(\d+)mg"),
    (Nutrient::Iron, r"iron\s+(\d+)mg"),
    (Nutrient::VitaminD, r"vitamin\s+d\s+(\d*)"),
    (Nutrient::Thiamin, r"thiamin\s+(\d*)"),
    (Nutrient::Riboflavin, r"riboflavin\s+(\d*)"),
    (Nutrient::Niacin, r"niacin\s+(\d*)"),
    (Nutrient::VitaminB6, r"vitamin\s+b6\s+(\d*)"),
    (Nutrient::FolicAcid, r"folic\s+acid\s+(\d*)"),
    (Nutrient::VitaminB12, r"vitamin\s+b12\s+(\d*)"),
    (Nutrient::PantothenicAcid, r"pantothenic\s+acid\s+(\d*)"),
];

/// Compiled form of [`NUTRIENT_PATTERNS`], built on first use.
static COMPILED: Lazy<Vec<(Nutrient, Regex)>> = Lazy::new(|| {
    NUTRIENT_PATTERNS
        .iter()
        .map(|(nutrient, pattern)| (*nutrient, Regex::new(pattern).unwrap()))
        .collect()
});

/// The compiled catalog. Read-only; shared freely across threads.
pub fn catalog() -> &'static [(Nutrient, Regex)] {
    &COMPILED
}
