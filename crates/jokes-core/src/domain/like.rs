//! Like relationship

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per (user, joke) pair; its existence means the user liked the joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub user_id: Uuid,
    pub joke_id: Uuid,
}

impl Like {
    pub fn new(user_id: Uuid, joke_id: Uuid) -> Self {
        Self { user_id, joke_id }
    }
}
