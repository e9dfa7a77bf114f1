//! Food catalog models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Food catalog entry
///
/// `purchase_count` only ever grows, and only together with a matching
/// `quantity` decrement when an order is placed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub image: String,
    pub description: String,
    pub origin: String,
    pub price: f64,
    pub quantity: i64,
    pub purchase_count: i64,
    pub added_by_email: String,
}

/// Mutable food fields accepted on create and update
///
/// The owner email and purchase count are never part of the payload: the
/// owner comes from the authorized query parameter, the purchase count is
/// adjusted exclusively by order placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPayload {
    pub name: String,
    pub category: String,
    pub image: String,
    pub description: String,
    pub origin: String,
    pub price: f64,
    pub quantity: i64,
}

impl FoodPayload {
    /// Validate the payload fields
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Food name is required".to_string());
        }

        if self.category.trim().is_empty() {
            return Err("Food category is required".to_string());
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }

        if self.quantity < 0 {
            return Err("Quantity must be non-negative".to_string());
        }

        Ok(())
    }
}
