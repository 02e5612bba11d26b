//! Salted, peppered HMAC-SHA256 password hashing.
//!
//! Encoded form: `v1$<salt>$<hex digest>` where the digest is
//! `HMAC-SHA256(pepper, salt || password)` and the salt is a random UUID.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::domain::user::PasswordHash;
use crate::ports::PasswordHasher;

const SCHEME: &str = "v1";

pub struct HmacPasswordHasher {
    pepper: Secret<String>,
}

impl HmacPasswordHasher {
    pub fn new(pepper: Secret<String>) -> Self {
        Self { pepper }
    }

    fn mac(&self, salt: &str, password: &str) -> Hmac<Sha256> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.pepper.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(salt.as_bytes());
        mac.update(password.as_bytes());
        mac
    }
}

impl PasswordHasher for HmacPasswordHasher {
    fn hash(&self, password: &str) -> PasswordHash {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = hex::encode(self.mac(&salt, password).finalize().into_bytes());
        PasswordHash::new(format!("{}${}${}", SCHEME, salt, digest))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        let mut parts = hash.as_str().split('$');
        let (Some(SCHEME), Some(salt), Some(expected), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(expected) = hex::decode(expected) else {
            return false;
        };

        let actual = self.mac(salt, password).finalize().into_bytes();
        if actual.len() != expected.len() {
            return false;
        }
        actual.as_slice().ct_eq(&expected).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher(pepper: &str) -> HmacPasswordHasher {
        HmacPasswordHasher::new(Secret::new(pepper.to_string()))
    }

    #[test]
    fn hash_verifies_original_password_only() {
        let hasher = hasher("pepper");
        let hash = hasher.hash("correct horse");

        assert!(hasher.verify("correct horse", &hash));
        assert!(!hasher.verify("correct horse ", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let hasher = hasher("pepper");
        assert_ne!(hasher.hash("secret"), hasher.hash("secret"));
    }

    #[test]
    fn hash_never_contains_the_password() {
        let hash = hasher("pepper").hash("plaintext-password");
        assert!(!hash.as_str().contains("plaintext-password"));
        assert!(hash.as_str().starts_with("v1$"));
    }

    #[test]
    fn digest_is_lowercase_hex_of_a_sha256_mac() {
        let hash = hasher("pepper").hash("secret");
        let digest = hash.as_str().rsplit('$').next().unwrap();

        assert_eq!(digest.len(), 64);
        assert_eq!(hex::decode(digest).unwrap().len(), 32);
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn different_pepper_fails_verification() {
        let hash = hasher("pepper-a").hash("secret");
        assert!(!hasher("pepper-b").verify("secret", &hash));
    }

    #[test]
    fn malformed_hashes_are_rejected() {
        let hasher = hasher("pepper");
        for encoded in [
            "",
            "v1$salt",
            "v2$salt$abcd",
            "v1$salt$abcd$extra",
            "v1$salt$not-hex",
            "plain",
        ] {
            assert!(!hasher.verify("secret", &PasswordHash::new(encoded)));
        }
    }
}
