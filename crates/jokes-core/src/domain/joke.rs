//! Joke domain entity and the per-viewer listing row

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Joke {
    pub id: Uuid,

    #[validate(length(min = 1, max = 1000, message = "Joke must be between 1 and 1000 characters"))]
    pub joke: String,

    pub author_id: Uuid,
    pub created: DateTime<Utc>,
}

impl Joke {
    pub fn new(author_id: Uuid, joke: String) -> Result<Self, validator::ValidationErrors> {
        let joke = Self {
            id: Uuid::new_v4(),
            joke: joke.trim().to_string(),
            author_id,
            created: Utc::now(),
        };

        joke.validate()?;
        Ok(joke)
    }

    pub fn is_authored_by(&self, user_id: &Uuid) -> bool {
        &self.author_id == user_id
    }
}

/// A joke as seen by one requesting user.
///
/// `likes` counts every like row for the joke; `liked` is true only when the
/// viewer's own like row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JokeView {
    pub id: Uuid,
    pub joke: String,
    pub created: DateTime<Utc>,
    pub author: String,
    pub likes: i64,
    pub liked: bool,
}
