//! Demo listings for a freshly provisioned campus.

use super::domain::NewFoodItem;

#[allow(clippy::too_many_arguments)]
fn listing(
    title: &str,
    description: &str,
    category: &str,
    quantity: f64,
    unit: &str,
    expiry_date: &str,
    location: &str,
    allergens: &[&str],
) -> NewFoodItem {
    NewFoodItem {
        title: title.into(),
        description: description.into(),
        category: category.into(),
        quantity,
        unit: unit.into(),
        expiry_date: expiry_date.into(),
        location: location.into(),
        image_url: None,
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn sample_items() -> Vec<NewFoodItem> {
    vec![
        listing(
            "Fresh Organic Apples",
            "Crisp red apples from the campus garden. Perfect for snacking or baking.",
            "Fruits & Vegetables", 5.0, "kg", "2024-12-25", "Student Center Kitchen", &[],
        ),
        listing(
            "Leftover Pizza Slices",
            "Margherita pizza from student event. Still warm and delicious!",
            "Prepared Foods", 8.0, "pieces", "2024-12-20", "Library Study Room 3", &["Gluten", "Dairy"],
        ),
        listing(
            "Whole Grain Bread",
            "Freshly baked whole grain bread from campus bakery. Great for sandwiches.",
            "Bakery", 2.0, "packages", "2024-12-22", "Dining Hall Main Entrance", &["Gluten"],
        ),
        listing(
            "Mixed Salad Greens",
            "Fresh mixed greens including spinach, arugula, and lettuce. Perfect for healthy meals.",
            "Fruits & Vegetables", 1.5, "kg", "2024-12-21", "Campus Greenhouse", &[],
        ),
        listing(
            "Yogurt Cups",
            "Assorted flavored yogurt cups. Great for breakfast or snacks.",
            "Dairy & Eggs", 12.0, "pieces", "2024-12-23", "Residence Hall Common Room", &["Dairy"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ALLERGENS, CATEGORIES, UNITS};

    #[test]
    fn samples_use_catalog_values() {
        let items = sample_items();
        assert_eq!(items.len(), 5);
        for item in &items {
            assert!(CATEGORIES.contains(&item.category.as_str()), "{}", item.category);
            assert!(UNITS.contains(&item.unit.as_str()), "{}", item.unit);
            assert!(item.allergens.iter().all(|a| ALLERGENS.contains(&a.as_str())));
            assert!(item.quantity > 0.0);
        }
    }
}
