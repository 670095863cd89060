//! JWT verification against the identity provider's key set

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::jwks::KeySource;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Malformed authorization header: {0}")]
    MalformedHeader(String),
    #[error("Token header has no key id")]
    MissingKeyId,
    #[error("Unable to find appropriate key: {0}")]
    UnknownKeyId(String),
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid audience")]
    InvalidAudience,
    #[error("Invalid issuer")]
    InvalidIssuer,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Key set unavailable: {0}")]
    KeySetUnavailable(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::InvalidAudience => JwtError::InvalidAudience,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            _ => JwtError::ValidationError(error.to_string()),
        }
    }
}

/// Registered claims this service relies on. Audience is checked by
/// `Validation` and not kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    issuer: String,
    audience: String,
    algorithm: Algorithm,
}

impl TokenVerifier {
    pub fn new(
        keys: Arc<dyn KeySource>,
        issuer: String,
        audience: String,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            keys,
            issuer,
            audience,
            algorithm,
        }
    }

    /// Checks signature, audience, issuer and expiry, returning the claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let header = decode_header(token)
            .map_err(|e| JwtError::MalformedHeader(e.to_string()))?;
        let kid = header.kid.ok_or(JwtError::MissingKeyId)?;

        let key_set = self.keys.key_set().await?;
        let jwk = key_set.find(&kid).ok_or_else(|| {
            warn!("No key {} in identity provider key set", kid);
            JwtError::UnknownKeyId(kid.clone())
        })?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| JwtError::UnsupportedKey(e.to_string()))?;

        let claims = decode::<Claims>(token, &key, &self.validation())?.claims;
        debug!("Token verified for subject {}", claims.sub);
        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
        validation
    }
}
