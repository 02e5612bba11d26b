//! Authentication adapters.
//!
//! Implementations of the auth ports:
//!
//! - `jwt` - HS256 tokens (`SessionValidator` + `TokenIssuer`)
//! - `password` - Salted HMAC-SHA256 `PasswordHasher`
//! - `mock` - Test validator that doesn't require signed tokens

mod jwt;
mod mock;
mod password;

pub use jwt::JwtTokenService;
pub use mock::MockSessionValidator;
pub use password::HmacPasswordHasher;
