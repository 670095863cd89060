//! Request extractors

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::auth::Subject;
use crate::state::AppState;

/// JSON body that is also run through `validator`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::BadRequest(format!("Incorrect json body: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(Self(value))
    }
}

/// The registered user behind the verified bearer token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let subject = parts
            .extensions
            .get::<Subject>()
            .ok_or_else(|| ApiError::Unauthorized("No verified subject on request".to_string()))?;

        let id = state.identity.resolve(subject.as_str()).await?;
        Ok(Self { id })
    }
}

/// Path identifiers that are not UUIDs name nothing, so they are not found.
pub fn parse_joke_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("Joke not found: {}", raw)))
}
