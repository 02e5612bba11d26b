//! Application layer - Services, Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Book/reading session mutations live in `services` (one unit of work per
//! call); account, profile and lookup operations live in `handlers`.

pub mod handlers;
pub mod services;

pub use services::{BookSessionService, ReadingSessionService};
