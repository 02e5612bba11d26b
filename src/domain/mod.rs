//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, percentages, errors)
//! - `reading` - Book sessions, reading sessions and derived reading metrics
//! - `user` - Registered users and their profiles

pub mod foundation;
pub mod reading;
pub mod user;
