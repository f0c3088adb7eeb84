use sea_orm::ActiveEnum;

use crate::food_item::{Allergens, ItemStatus};

#[test]
fn status_db_values_are_lowercase() {
    assert_eq!(ItemStatus::Available.to_value(), "available");
    assert_eq!(ItemStatus::Claimed.to_value(), "claimed");
    assert_eq!(ItemStatus::Expired.to_value(), "expired");
    assert_eq!(ItemStatus::try_from_value(&"claimed".to_string()).unwrap(), ItemStatus::Claimed);
    assert!(ItemStatus::try_from_value(&"gone".to_string()).is_err());
}

#[test]
fn status_serde_matches_db_values() {
    let json = serde_json::to_string(&ItemStatus::Available).unwrap();
    assert_eq!(json, "\"available\"");
    let back: ItemStatus = serde_json::from_str("\"expired\"").unwrap();
    assert_eq!(back, ItemStatus::Expired);
    assert_eq!(ItemStatus::Claimed.to_string(), "claimed");
}

#[test]
fn allergens_are_a_plain_json_array() {
    let a = Allergens(vec!["Gluten".into(), "Dairy".into()]);
    let v = serde_json::to_value(&a).unwrap();
    assert_eq!(v, serde_json::json!(["Gluten", "Dairy"]));
    let empty: Allergens = serde_json::from_str("[]").unwrap();
    assert!(empty.0.is_empty());
}
