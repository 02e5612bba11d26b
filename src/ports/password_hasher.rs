//! Password hashing port.

use crate::domain::user::PasswordHash;

/// Produces and checks salted password hashes.
///
/// `verify` must compare in constant time.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> PasswordHash;

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}
