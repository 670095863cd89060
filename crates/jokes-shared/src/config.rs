//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_ALGORITHM, DEFAULT_PORT, ENV_PREFIX, JWKS_PATH};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Identity provider settings used to verify bearer tokens.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// Expected `iss` claim, e.g. `https://tenant.eu.auth0.com/`.
    pub issuer: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Key set location. Derived from the issuer when absent.
    #[serde(default)]
    pub jwks_url: Option<String>,
    pub algorithm: String,
    pub jwks_timeout_seconds: u64,
}

impl AuthSettings {
    pub fn jwks_url(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => format!("{}/{}", self.issuer.trim_end_matches('/'), JWKS_PATH),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    #[serde(default)]
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("http.allowed_origins")
                    .try_parsing(true),
            )
            // Plain Auth0 variable names, as set by the hosting environment
            .set_override_option("auth.issuer", std::env::var("AUTH0_DOMAIN").ok())?
            .set_override_option("auth.audience", std::env::var("AUTH0_API_AUDIENCE").ok())?
            .set_override("app.env", env)?
            .build()?;
        config.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", DEFAULT_PORT)?
            .set_default("app.name", "jokes-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("auth.algorithm", DEFAULT_ALGORITHM)?
            .set_default("auth.jwks_timeout_seconds", 10)?
            .set_default("http.allowed_origins", vec!["*"])?
            .set_default("logging.format", "json")
    }
}
