//! Tastr API service
//!
//! REST backend for the food-ordering client: catalog listing and search,
//! per-user orders, and cookie-based session tokens. All state lives in
//! PostgreSQL; the service itself is stateless between requests.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
