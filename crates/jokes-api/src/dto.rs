//! Request and response payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use jokes_core::domain::User;

/// Body of `POST /api/user`. Upper bounds apply to the trimmed value and
/// are checked by `User::new`.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUserRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
}

/// Body of `POST /api/jokes/new`
#[derive(Debug, Deserialize, Validate)]
pub struct NewJokeRequest {
    #[validate(length(min = 1, message = "Joke must not be empty"))]
    pub joke: String,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}
