//! In-memory adapters - Port implementations without external services.
//!
//! - `InMemoryStore` - Users, profiles, book sessions and reading sessions

mod store;

pub use store::InMemoryStore;
