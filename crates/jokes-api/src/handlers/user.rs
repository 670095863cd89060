//! User registration handlers

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use crate::dto::{NewUserRequest, UserDto};
use crate::error::ApiError;
use crate::extract::{CurrentUser, ValidatedJson};
use crate::middleware::Subject;
use crate::state::AppState;

/// POST /api/user
///
/// Only needs a verified token: the subject is not registered yet.
pub async fn register(
    State(state): State<AppState>,
    Extension(subject): Extension<Subject>,
    ValidatedJson(payload): ValidatedJson<NewUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = state.users.register(subject.as_str(), &payload.username).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// DELETE /api/user
pub async fn delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    info!("Delete requested by user {}", user.id);
    state.users.delete(&user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
