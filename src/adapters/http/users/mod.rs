//! HTTP adapter for accounts and profiles.
//!
//! - `POST /api/users/register` - Create an account
//! - `POST /api/users/login` - Exchange credentials for a bearer token
//! - `GET /api/users/me` - Current user with book totals
//! - `DELETE /api/users/me` - Delete the current user and everything it owns
//! - `POST /api/users/profile` - Create the caller's profile
//! - `GET/PATCH/DELETE /api/users/profile/:id` - Profile detail, update, delete

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::user_routes;
