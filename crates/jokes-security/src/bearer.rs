//! `Authorization` header parsing

use crate::jwt::JwtError;

const BEARER_PREFIX: &str = "bearer ";

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Result<&str, JwtError> {
    let value = header_value.trim();
    match (value.get(..BEARER_PREFIX.len()), value.get(BEARER_PREFIX.len()..)) {
        // The trailing trim above guarantees a non-empty token here
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => Ok(token.trim()),
        _ => Err(JwtError::MalformedHeader(
            "Authorization header format must be Bearer {token}".to_string(),
        )),
    }
}
