//! Identity provider key sets

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::jwt::JwtError;

/// Where verification keys come from.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn key_set(&self) -> Result<JwkSet, JwtError>;
}

/// Fetches the provider's published JWKS document on every call.
pub struct HttpJwksSource {
    client: Client,
    url: String,
}

impl HttpJwksSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, JwtError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JwtError::KeySetUnavailable(format!("http client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl KeySource for HttpJwksSource {
    async fn key_set(&self) -> Result<JwkSet, JwtError> {
        debug!("Fetching key set from {}", self.url);

        let keys = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| JwtError::KeySetUnavailable(e.to_string()))?
            .json::<JwkSet>()
            .await
            .map_err(|e| JwtError::KeySetUnavailable(format!("invalid key set: {}", e)))?;

        debug!("Key set contains {} keys", keys.keys.len());
        Ok(keys)
    }
}

/// A fixed key set, for deployments that pin keys locally.
#[derive(Clone)]
pub struct StaticJwksSource {
    keys: JwkSet,
}

impl StaticJwksSource {
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }

    pub fn from_json(document: &str) -> Result<Self, JwtError> {
        serde_json::from_str(document)
            .map(Self::new)
            .map_err(|e| JwtError::KeySetUnavailable(format!("invalid key set: {}", e)))
    }
}

#[async_trait]
impl KeySource for StaticJwksSource {
    async fn key_set(&self) -> Result<JwkSet, JwtError> {
        Ok(self.keys.clone())
    }
}
