//! # Jokes Security
//!
//! Bearer token verification against an external identity provider.

pub mod bearer;
pub mod jwks;
pub mod jwt;

pub use bearer::bearer_token;
pub use jwks::{HttpJwksSource, KeySource, StaticJwksSource};
pub use jwt::{Claims, JwtError, TokenVerifier};

#[cfg(test)]
pub(crate) mod test_support;
