//! # Prediction Request
//!
//! The caller-supplied record for one prediction. The shop-size field is
//! named `shoe_size` on the wire; existing callers send that name, so the
//! serde name is kept while the Rust field says what it means.

use serde::{Deserialize, Serialize};

use crate::category::{AreaType, ShopSize};
use crate::pincode::Pincode;

/// One prediction request. Lives for the duration of a single call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub pincode: Pincode,
    pub area_type: AreaType,
    /// Number of competing stores nearby.
    pub competitors: u32,
    pub employee_count: u32,
    /// Raw stock availability figure; its scale is whatever the caller uses.
    pub stock_availability: f64,
    #[serde(rename = "shoe_size")]
    pub shop_size: ShopSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_external_field_names() {
        let req: PredictionRequest = serde_json::from_value(json!({
            "pincode": 411001,
            "area_type": "Urban",
            "competitors": 3,
            "employee_count": 10,
            "stock_availability": 80,
            "shoe_size": "Medium"
        }))
        .unwrap();
        assert_eq!(req.pincode, Pincode::new(411001));
        assert_eq!(req.area_type, AreaType::Urban);
        assert_eq!(req.stock_availability, 80.0);
        assert_eq!(req.shop_size, ShopSize::Label("Medium".into()));
    }

    #[test]
    fn numeric_shoe_size_is_accepted() {
        let req: PredictionRequest = serde_json::from_value(json!({
            "pincode": 1,
            "area_type": "Rural",
            "competitors": 0,
            "employee_count": 0,
            "stock_availability": 0,
            "shoe_size": 550
        }))
        .unwrap();
        assert_eq!(req.shop_size, ShopSize::Numeric(550.0));
    }

    #[test]
    fn missing_field_is_rejected_with_its_name() {
        let err = serde_json::from_value::<PredictionRequest>(json!({
            "pincode": 1,
            "area_type": "Rural",
            "competitors": 0,
            "employee_count": 0,
            "stock_availability": 0
        }))
        .unwrap_err();
        assert!(err.to_string().contains("shoe_size"));
    }

    #[test]
    fn serializes_shop_size_as_shoe_size() {
        let req = PredictionRequest {
            pincode: Pincode::new(1),
            area_type: AreaType::Rural,
            competitors: 0,
            employee_count: 0,
            stock_availability: 0.0,
            shop_size: ShopSize::Label("Large".into()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["shoe_size"], "Large");
        assert!(value.get("shop_size").is_none());
    }
}
