//! Application-wide constants

pub const ENV_PREFIX: &str = "JOKES";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ALGORITHM: &str = "RS256";
pub const JWKS_PATH: &str = ".well-known/jwks.json";
pub const LOG_FILE_PREFIX: &str = "jokes-server.log";
