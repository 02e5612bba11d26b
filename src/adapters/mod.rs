//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - JWT tokens and password hashing
//! - `http` - axum REST API
//! - `memory` - In-process store for tests and local development
//! - `postgres` - sqlx-backed persistence

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
