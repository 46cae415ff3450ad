//! Shared types for NutriLens: the closed nutrient set and the extracted
//! nutrition record.

pub mod nutrient;
pub mod record;

pub use nutrient::Nutrient;
pub use record::{DailyValue, NutritionRecord};
