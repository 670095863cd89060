use async_trait::async_trait;
use jsonwebtoken::Algorithm;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use jokes_api::{build_router, AppState, Readiness};
use jokes_infrastructure::{create_pool, ping, PgJokeRepository, PgLikeRepository, PgUserRepository};
use jokes_security::{HttpJwksSource, TokenVerifier};
use jokes_shared::config::AppConfig;
use jokes_shared::telemetry::init_telemetry;

struct PgReadiness(PgPool);

#[async_trait]
impl Readiness for PgReadiness {
    async fn check(&self) -> Result<(), String> {
        ping(&self.0).await.map_err(|e| e.to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on shutdown
    let _log_guard = init_telemetry(&config.logging)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };
    info!("Database connection established.");

    // Token verification
    let algorithm: Algorithm = config
        .auth
        .algorithm
        .parse()
        .map_err(|e| anyhow::anyhow!("Unsupported token algorithm {}: {}", config.auth.algorithm, e))?;
    let key_source = HttpJwksSource::new(
        config.auth.jwks_url(),
        Duration::from_secs(config.auth.jwks_timeout_seconds),
    )?;
    info!("Verifying tokens against {}", key_source.url());
    let verifier = TokenVerifier::new(
        Arc::new(key_source),
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        algorithm,
    );

    // Create App State
    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgJokeRepository::new(pool.clone())),
        Arc::new(PgLikeRepository::new(pool.clone())),
        Arc::new(verifier),
        Arc::new(PgReadiness(pool)),
    );

    let app = build_router(state, &config.http);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
