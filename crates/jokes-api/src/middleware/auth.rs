use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use jokes_security::{bearer_token, JwtError};

use crate::error::ApiError;
use crate::state::AppState;

/// Identity provider subject of a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(pub String);

impl Subject {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejects requests without a valid bearer token and records the token's
/// subject in the request extensions.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .ok_or(JwtError::MissingToken)?
            .to_str()
            .map_err(|e| JwtError::MalformedHeader(e.to_string()))?;
        bearer_token(header)?.to_string()
    };

    let claims = state.verifier.verify(&token).await?;
    debug!("Authenticated subject {}", claims.sub);

    request.extensions_mut().insert(Subject(claims.sub));
    Ok(next.run(request).await)
}
