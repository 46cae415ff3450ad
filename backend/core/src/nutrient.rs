use std::fmt;

use serde::{Deserialize, Serialize};

/// A nutrient that can appear on a nutrition-facts label.
///
/// The set is closed. Declaration order is the order used when a record is
/// serialized, so keep it in label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    Calories,
    #[serde(rename = "Total Fat")]
    TotalFat,
    #[serde(rename = "Saturated Fat")]
    SaturatedFat,
    #[serde(rename = "Trans Fat")]
    TransFat,
    #[serde(rename = "Polyunsaturated Fat")]
    PolyunsaturatedFat,
    #[serde(rename = "Monounsaturated Fat")]
    MonounsaturatedFat,
    Cholesterol,
    Sodium,
    Potassium,
    #[serde(rename = "Total Carbohydrate")]
    TotalCarbohydrate,
    #[serde(rename = "Dietary Fiber")]
    DietaryFiber,
    Sugars,
    Protein,
    #[serde(rename = "Vitamin A")]
    VitaminA,
    #[serde(rename = "Vitamin C")]
    VitaminC,
    Calcium,
    Iron,
    #[serde(rename = "Vitamin D")]
    VitaminD,
    Thiamin,
    Riboflavin,
    Niacin,
    #[serde(rename = "Vitamin B6")]
    VitaminB6,
    #[serde(rename = "Folic Acid")]
    FolicAcid,
    #[serde(rename = "Vitamin B12")]
    VitaminB12,
    #[serde(rename = "Pantothenic Acid")]
    PantothenicAcid,
}

impl Nutrient {
    /// Every nutrient, in label order.
    pub const ALL: [Nutrient; 25] = [
        Nutrient::Calories,
        Nutrient::TotalFat,
        Nutrient::SaturatedFat,
        Nutrient::TransFat,
        Nutrient::PolyunsaturatedFat,
        Nutrient::MonounsaturatedFat,
        Nutrient::Cholesterol,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::TotalCarbohydrate,
        Nutrient::DietaryFiber,
        Nutrient::Sugars,
        Nutrient::Protein,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::VitaminD,
        Nutrient::Thiamin,
        Nutrient::Riboflavin,
        Nutrient::Niacin,
        Nutrient::VitaminB6,
        Nutrient::FolicAcid,
        Nutrient::VitaminB12,
        Nutrient::PantothenicAcid,
    ];

    /// Canonical display name, identical to the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::TotalFat => "Total Fat",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::TransFat => "Trans Fat",
            Nutrient::PolyunsaturatedFat => "Polyunsaturated Fat",
            Nutrient::MonounsaturatedFat => "Monounsaturated Fat",
            Nutrient::Cholesterol => "Cholesterol",
            Nutrient::Sodium => "Sodium",
            Nutrient::Potassium => "Potassium",
            Nutrient::TotalCarbohydrate => "Total Carbohydrate",
            Nutrient::DietaryFiber => "Dietary Fiber",
            Nutrient::Sugars => "Sugars",
            Nutrient::Protein => "Protein",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::Thiamin => "Thiamin",
            Nutrient::Riboflavin => "Riboflavin",
            Nutrient::Niacin => "Niacin",
            Nutrient::VitaminB6 => "Vitamin B6",
            Nutrient::FolicAcid => "Folic Acid",
            Nutrient::VitaminB12 => "Vitamin B12",
            Nutrient::PantothenicAcid => "Pantothenic Acid",
        }
    }

    /// Unit suffix the label prints after the value, if any.
    ///
    /// Display only; extracted values are never converted.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Nutrient::TotalFat
            | Nutrient::SaturatedFat
            | Nutrient::TransFat
            | Nutrient::PolyunsaturatedFat
            | Nutrient::MonounsaturatedFat
            | Nutrient::TotalCarbohydrate
            | Nutrient::DietaryFiber
            | Nutrient::Sugars
            | Nutrient::Protein => Some("g"),
            Nutrient::Cholesterol
            | Nutrient::Sodium
            | Nutrient::Potassium
            | Nutrient::Calcium
            | Nutrient::Iron => Some("mg"),
            _ => None,
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
