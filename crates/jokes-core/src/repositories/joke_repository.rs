//! Joke repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Joke, JokeView};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokeRepository: Send + Sync {
    async fn create(&self, joke: &Joke) -> Result<Joke, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Joke>, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;

    /// Full listing annotated for `viewer_id`.
    async fn list_for_viewer(&self, viewer_id: &Uuid) -> Result<Vec<JokeView>, DomainError>;
}
