//! Nutrition-label understanding: OCR text normalization, nutrient
//! extraction, and the OCR provider that feeds them.

pub mod catalog;
pub mod clean;
pub mod daily_value;
pub mod extract;
pub mod facts;
pub mod ocr;

pub use catalog::{catalog, NUTRIENT_PATTERNS};
pub use clean::{clean, CleanedText};
pub use daily_value::{extract_daily_value, percentages};
pub use extract::extract_nutrients;
pub use facts::{analyze_label, parse_nutrition_facts, LabelAnalysis};
pub use ocr::{DisabledOcr, GoogleVisionOcr, OcrError, OcrProvider, VisionAuth};
