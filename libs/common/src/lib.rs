//! Shared infrastructure for the Tastr backend
//!
//! This crate holds the pieces the service binaries have in common:
//! PostgreSQL connection pooling, schema bootstrap for the `foods` and
//! `orders` tables, and the database error types.

pub mod database;
pub mod error;
