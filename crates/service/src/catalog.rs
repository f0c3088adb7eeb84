//! Suggested values offered to donors. Advisory only: listings are never
//! validated against these lists.

use serde::Serialize;

/// Category filter value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

pub const CATEGORIES: &[&str] = &[
    "Fruits & Vegetables",
    "Dairy & Eggs",
    "Meat & Seafood",
    "Bakery",
    "Pantry Items",
    "Beverages",
    "Prepared Foods",
    "Other",
];

pub const UNITS: &[&str] = &["pieces", "kg", "g", "liters", "ml", "packages", "servings"];

pub const ALLERGENS: &[&str] = &["Nuts", "Dairy", "Eggs", "Gluten", "Soy", "Shellfish", "Fish", "Sesame"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub categories: Vec<&'static str>,
    pub units: Vec<&'static str>,
    pub allergens: Vec<&'static str>,
    pub all_categories: &'static str,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            categories: CATEGORIES.to_vec(),
            units: UNITS.to_vec(),
            allergens: ALLERGENS.to_vec(),
            all_categories: ALL_CATEGORIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_not_a_category() {
        assert!(!CATEGORIES.contains(&ALL_CATEGORIES));
    }

    #[test]
    fn catalog_serializes_camel_case() {
        let v = serde_json::to_value(Catalog::default()).unwrap();
        assert_eq!(v["allCategories"], "all");
        assert_eq!(v["categories"].as_array().unwrap().len(), 8);
        assert_eq!(v["units"][1], "kg");
    }
}
