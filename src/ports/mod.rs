//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Reading Ports
//!
//! - `ReadingStore` / `ReadingUnitOfWork` - Transactional writes for book and reading sessions
//! - `ReadingReader` - Committed-state queries
//!
//! ## User Ports
//!
//! - `UserRepository` - Registered users
//! - `ProfileRepository` - One-to-one user profiles
//!
//! ## Auth Ports
//!
//! - `PasswordHasher` - Credential hashing
//! - `SessionValidator` / `TokenIssuer` - Bearer tokens

mod password_hasher;
mod profile_repository;
mod reading_reader;
mod reading_store;
mod session_validator;
mod user_repository;

pub use password_hasher::PasswordHasher;
pub use profile_repository::ProfileRepository;
pub use reading_reader::ReadingReader;
pub use reading_store::{ReadingStore, ReadingUnitOfWork};
pub use session_validator::{IssuedToken, SessionValidator, TokenIssuer};
pub use user_repository::UserRepository;
