//! HTTP routes for the Tastr API
//!
//! This module wires the router and hosts the session endpoints; the
//! catalog and order handlers live in [`foods`] and [`orders`]. Private
//! routes are grouped into a sub-router wrapped by the authentication
//! middleware, so no private handler runs without a verified identity.

use axum::{
    Json, Router,
    extract::State,
    http::{Method, header},
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    jwt::IdentityClaims,
    middleware::{TOKEN_COOKIE, auth_middleware},
    state::{AppState, CookieOptions},
};

pub mod foods;
pub mod orders;

/// Create the router for the Tastr API
pub fn create_router(state: AppState) -> Router {
    let private = Router::new()
        .route("/api/my-foods", get(foods::my_foods))
        .route("/api/foods", post(foods::create_food))
        .route("/api/foods/:id", patch(foods::update_food))
        .route("/api/orders", get(orders::my_orders))
        .route("/api/orders", post(orders::place_order))
        .route("/api/orders/:id", delete(orders::delete_order))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // The browser client lives on another origin and sends the session
    // cookie, so the origin list is explicit and credentials are allowed.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(state.cors.allowed_origins.clone()))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(liveness))
        .route("/api/jwt", post(issue_token))
        .route("/api/jwt/logout", post(logout))
        .route("/api/foods", get(foods::list_foods))
        .route("/api/foodsCount", get(foods::foods_count))
        .route("/api/foods/category", post(foods::foods_by_category))
        .route("/api/top-foods", get(foods::top_foods))
        .route("/api/foods/:id", get(foods::food_by_id))
        .merge(private)
        .layer(cors)
        .with_state(state)
}

/// Parse a path or body identifier into a database key
pub(crate) fn parse_id(kind: &'static str, raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidArgument(format!("Malformed {kind} id")))
}

/// Liveness endpoint
pub async fn liveness() -> &'static str {
    "Tastr server is running"
}

fn session_cookie(value: String, opts: &CookieOptions) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(opts.secure)
        .same_site(opts.same_site)
        .build()
}

/// Issue a session token and set it as an HTTP-only cookie
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<IdentityClaims>,
) -> ApiResult<impl IntoResponse> {
    if identity.email.trim().is_empty() {
        return Err(ApiError::InvalidArgument("Email is required".to_string()));
    }

    let token = state.jwt_service.issue(&identity).map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        ApiError::Internal
    })?;

    let jar = jar.add(session_cookie(token, &state.cookies));

    Ok((jar, Json(json!({"success": true}))))
}

/// Clear the session cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(session_cookie(String::new(), &state.cookies));

    (jar, Json(json!({"logoutSuccess": true})))
}
