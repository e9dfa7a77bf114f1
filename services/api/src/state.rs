//! Application state shared across handlers

use axum::http::HeaderValue;
use axum_extra::extract::cookie::SameSite;
use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{food::FoodRepository, order::OrderRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub foods: FoodRepository,
    pub orders: OrderRepository,
    pub jwt_service: JwtService,
    pub cookies: CookieOptions,
    pub cors: CorsConfig,
}

impl AppState {
    /// Build the state from an initialized pool and JWT service
    pub fn new(
        pool: PgPool,
        jwt_service: JwtService,
        cookies: CookieOptions,
        cors: CorsConfig,
    ) -> Self {
        Self {
            foods: FoodRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            db_pool: pool,
            jwt_service,
            cookies,
            cors,
        }
    }
}

/// Attributes applied to the session cookie
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieOptions {
    /// Derive cookie attributes from `APP_ENV`
    ///
    /// In production the browser client is served from another origin, so
    /// the cookie must be `Secure` with `SameSite=None`; everywhere else
    /// `SameSite=Strict` applies.
    pub fn from_env() -> Self {
        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        if production {
            Self {
                secure: true,
                same_site: SameSite::None,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Strict,
            }
        }
    }
}

/// Browser origins the food-ordering client is served from
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "https://tastr-client.web.app",
    "https://tastr-client.firebaseapp.com",
];

/// Cross-origin configuration for the browser client
///
/// The session cookie travels cross-site in production, so the allowed
/// origins must be an explicit list; credentialed CORS forbids a wildcard.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    /// Derive the allowed origins from `CORS_ALLOWED_ORIGINS`
    ///
    /// Accepts a comma-separated list; falls back to the dev and hosted
    /// client origins when the variable is unset. Entries that are not
    /// valid header values are dropped.
    pub fn from_env() -> Self {
        let raw = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.join(","));

        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| origin.parse().ok())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_origins_cover_dev_and_hosted_clients() {
        let config = CorsConfig {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect(),
        };
        assert_eq!(config.allowed_origins.len(), 4);
        assert!(
            config
                .allowed_origins
                .contains(&HeaderValue::from_static("https://tastr-client.web.app"))
        );
    }
}
