//! Order handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, require_owner},
    models::{EmailQuery, order::PlaceOrderRequest},
    repositories::order::PlaceOrderError,
    routes::parse_id,
    state::AppState,
};

/// Orders placed by the caller (private)
pub async fn my_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<impl IntoResponse> {
    require_owner(&user, &query.email)?;

    let orders = state.orders.list_by_buyer(&query.email).await?;

    Ok(Json(orders))
}

/// Place an order (private)
///
/// Decrements the food's stock and increments its purchase counter
/// atomically with the order insert.
pub async fn place_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<EmailQuery>,
    Json(body): Json<PlaceOrderRequest>,
) -> ApiResult<impl IntoResponse> {
    require_owner(&user, &query.email)?;
    body.validate().map_err(ApiError::InvalidArgument)?;

    let food_id = parse_id("food", &body.food_id)?;

    let order_id = state
        .orders
        .place(&query.email, food_id, body.order_quantity)
        .await
        .map_err(|e| match e {
            PlaceOrderError::FoodNotFound => ApiError::NotFound("food"),
            PlaceOrderError::InsufficientStock => ApiError::InsufficientStock,
            PlaceOrderError::Database(e) => ApiError::Database(e),
        })?;

    Ok((StatusCode::CREATED, Json(json!({"insertedId": order_id}))))
}

/// Delete one of the caller's orders (private)
///
/// The food's stock and purchase count stay as they are; deleting an order
/// is record removal, not a refund.
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<impl IntoResponse> {
    require_owner(&user, &query.email)?;

    let id = parse_id("order", &id)?;

    let deleted = state.orders.delete(id, &query.email).await?;
    if !deleted {
        return Err(ApiError::NotFound("order"));
    }

    Ok(Json(json!({"deletedCount": 1})))
}
