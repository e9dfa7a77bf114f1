//! Repositories for database operations
//!
//! All cross-request state lives in PostgreSQL; each repository is a thin
//! handle over the shared connection pool.

pub mod food;
pub mod order;
