//! Order models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A placed order
///
/// Food name/price/image are denormalized from the food row at placement
/// time; an order is never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub food_id: Uuid,
    pub buyer_email: String,
    pub order_quantity: i64,
    pub food_name: String,
    pub food_price: f64,
    pub food_image: String,
    pub created_at: DateTime<Utc>,
}

/// Body for placing an order
///
/// `food_id` stays a string so a malformed identifier surfaces as a 400
/// instead of a body-rejection, consistent with path identifiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub food_id: String,
    pub order_quantity: i64,
}

impl PlaceOrderRequest {
    /// Validate the payload fields
    pub fn validate(&self) -> Result<(), String> {
        if self.order_quantity < 1 {
            return Err("Order quantity must be a positive integer".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_quantity_passes() {
        let req = PlaceOrderRequest {
            food_id: Uuid::nil().to_string(),
            order_quantity: 3,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn zero_and_negative_quantity_are_rejected() {
        for qty in [0, -2] {
            let req = PlaceOrderRequest {
                food_id: Uuid::nil().to_string(),
                order_quantity: qty,
            };
            assert!(req.validate().is_err());
        }
    }

    #[test]
    fn request_body_is_camel_case() {
        let req: PlaceOrderRequest =
            serde_json::from_str(r#"{"foodId":"abc","orderQuantity":2}"#).unwrap();
        assert_eq!(req.food_id, "abc");
        assert_eq!(req.order_quantity, 2);
    }
}
