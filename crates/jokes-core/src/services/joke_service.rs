//! Joke listing, authoring, and likes

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{Joke, JokeView, Like};
use crate::error::DomainError;
use crate::repositories::{JokeRepository, LikeRepository};

pub struct JokeService {
    joke_repo: Arc<dyn JokeRepository>,
    like_repo: Arc<dyn LikeRepository>,
}

impl JokeService {
    pub fn new(joke_repo: Arc<dyn JokeRepository>, like_repo: Arc<dyn LikeRepository>) -> Self {
        Self {
            joke_repo,
            like_repo,
        }
    }

    pub async fn list_for(&self, viewer_id: &Uuid) -> Result<Vec<JokeView>, DomainError> {
        let jokes = self.joke_repo.list_for_viewer(viewer_id).await?;
        debug!("Listed {} jokes for user {}", jokes.len(), viewer_id);
        Ok(jokes)
    }

    pub async fn create(&self, author_id: &Uuid, text: &str) -> Result<Joke, DomainError> {
        let joke = Joke::new(*author_id, text.to_string())?;
        let created = self.joke_repo.create(&joke).await?;

        info!("User {} created joke {}", author_id, created.id);
        Ok(created)
    }

    /// Only the author may delete a joke.
    pub async fn delete(&self, requester_id: &Uuid, joke_id: &Uuid) -> Result<(), DomainError> {
        let joke = self.require_joke(joke_id).await?;

        if !joke.is_authored_by(requester_id) {
            warn!("User {} tried to delete joke {} of {}", requester_id, joke_id, joke.author_id);
            return Err(DomainError::NotJokeAuthor(*joke_id));
        }

        // A concurrent delete may have won the race
        if !self.joke_repo.delete(joke_id).await? {
            return Err(DomainError::JokeNotFound(*joke_id));
        }

        info!("User {} deleted joke {}", requester_id, joke_id);
        Ok(())
    }

    pub async fn like(&self, user_id: &Uuid, joke_id: &Uuid) -> Result<(), DomainError> {
        self.require_joke(joke_id).await?;

        let inserted = self.like_repo.insert(&Like::new(*user_id, *joke_id)).await?;
        debug!("User {} liked joke {} (new: {})", user_id, joke_id, inserted);
        Ok(())
    }

    pub async fn unlike(&self, user_id: &Uuid, joke_id: &Uuid) -> Result<(), DomainError> {
        self.require_joke(joke_id).await?;

        let removed = self.like_repo.delete(&Like::new(*user_id, *joke_id)).await?;
        debug!("User {} unliked joke {} (removed: {})", user_id, joke_id, removed);
        Ok(())
    }

    async fn require_joke(&self, joke_id: &Uuid) -> Result<Joke, DomainError> {
        self.joke_repo
            .find_by_id(joke_id)
            .await?
            .ok_or(DomainError::JokeNotFound(*joke_id))
    }
}
