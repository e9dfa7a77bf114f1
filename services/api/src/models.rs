//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod food;
pub mod order;

/// Query parameter carrying the claimed owner email on private routes
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Query parameters for catalog listing
///
/// `page`/`size` paginate only when both are present, matching the
/// original API where the unparameterized call returns everything.
#[derive(Debug, Default, Deserialize)]
pub struct FoodListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Body for the category filter endpoint
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: String,
}

/// Response for the catalog count endpoint
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
