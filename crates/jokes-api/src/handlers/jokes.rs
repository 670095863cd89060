//! Joke handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use jokes_core::domain::{Joke, JokeView};

use crate::dto::NewJokeRequest;
use crate::error::ApiError;
use crate::extract::{parse_joke_id, CurrentUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/jokes
pub async fn list_jokes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<JokeView>>, ApiError> {
    Ok(Json(state.jokes.list_for(&user.id).await?))
}

/// POST /api/jokes/new
pub async fn new_joke(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<NewJokeRequest>,
) -> Result<(StatusCode, Json<Joke>), ApiError> {
    let joke = state.jokes.create(&user.id, &payload.joke).await?;
    Ok((StatusCode::CREATED, Json(joke)))
}

/// DELETE /api/jokes/{joke_id}
pub async fn delete_joke(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(joke_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let joke_id = parse_joke_id(&joke_id)?;
    state.jokes.delete(&user.id, &joke_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/jokes/like/{joke_id}
pub async fn like_joke(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(joke_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let joke_id = parse_joke_id(&joke_id)?;
    state.jokes.like(&user.id, &joke_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/jokes/unlike/{joke_id}
pub async fn unlike_joke(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(joke_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let joke_id = parse_joke_id(&joke_id)?;
    state.jokes.unlike(&user.id, &joke_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
