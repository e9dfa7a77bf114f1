//! Food catalog handlers

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
    models::{CategoryRequest, CountResponse, EmailQuery, FoodListQuery, food::FoodPayload},
    routes::parse_id,
    state::AppState,
};

/// How many foods the trending view shows
const TOP_FOODS_LIMIT: i64 = 6;

/// List the catalog, with optional name search and pagination (public)
pub async fn list_foods(
    State(state): State<AppState>,
    Query(query): Query<FoodListQuery>,
) -> ApiResult<impl IntoResponse> {
    let foods = state
        .foods
        .list(query.search.as_deref(), query.page, query.size)
        .await?;

    Ok(Json(foods))
}

/// Total catalog size (public)
pub async fn foods_count(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let count = state.foods.count().await?;

    Ok(Json(CountResponse { count }))
}

/// Foods in an exact category (public)
pub async fn foods_by_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    let foods = state.foods.list_by_category(&body.category).await?;

    Ok(Json(foods))
}

/// The most purchased foods (public)
pub async fn top_foods(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let foods = state.foods.top(TOP_FOODS_LIMIT).await?;

    Ok(Json(foods))
}

/// Foods created by the caller (private)
pub async fn my_foods(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<impl IntoResponse> {
    require_owner(&user, &query.email)?;

    let foods = state.foods.list_by_owner(&query.email).await?;

    Ok(Json(foods))
}

/// Single food by id (public)
pub async fn food_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id("food", &id)?;

    let food = state
        .foods
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("food"))?;

    Ok(Json(food))
}

/// Add a food to the catalog (private)
pub async fn create_food(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<EmailQuery>,
    Json(payload): Json<FoodPayload>,
) -> ApiResult<impl IntoResponse> {
    require_owner(&user, &query.email)?;
    payload.validate().map_err(ApiError::InvalidArgument)?;

    let id = state.foods.create(&query.email, &payload).await?;

    Ok((StatusCode::CREATED, Json(json!({"insertedId": id}))))
}

/// Replace the mutable fields of a food (private)
pub async fn update_food(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Query(query): Query<EmailQuery>,
    Json(payload): Json<FoodPayload>,
) -> ApiResult<impl IntoResponse> {
    require_owner(&user, &query.email)?;
    payload.validate().map_err(ApiError::InvalidArgument)?;

    let id = parse_id("food", &id)?;

    let modified = state.foods.update(id, &payload).await?;
    if modified == 0 {
        return Err(ApiError::NotFound("food"));
    }

    Ok(Json(json!({"modifiedCount": modified})))
}
