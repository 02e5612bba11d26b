//! Book Dogs - reading tracker backend.
//!
//! Users track books as book sessions and log timed reading sessions
//! against them; progress and pace are derived from those sessions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
