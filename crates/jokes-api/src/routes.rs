//! The route table

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use jokes_shared::config::HttpSettings;

use crate::handlers::{health, jokes, user};
use crate::middleware::require_token;
use crate::state::AppState;

pub fn build_router(state: AppState, http: &HttpSettings) -> Router {
    // Public routes (no token)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/", get(health::ping));

    // Everything else needs a verified bearer token; all routes but
    // registration also resolve the caller to a registered user.
    let protected_routes = Router::new()
        .route("/api/user", post(user::register).delete(user::delete_user))
        .route("/api/jokes", get(jokes::list_jokes))
        .route("/api/jokes/new", post(jokes::new_joke))
        .route("/api/jokes/{joke_id}", delete(jokes::delete_joke))
        .route("/api/jokes/like/{joke_id}", post(jokes::like_joke))
        .route("/api/jokes/unlike/{joke_id}", post(jokes::unlike_joke))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    let mut app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state);

    // Frontend bundle
    if let Some(dir) = &http.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors_layer(&http.allowed_origins))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
