//! Like repository trait (port)

use async_trait::async_trait;

use crate::domain::Like;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Returns false when the like already existed.
    async fn insert(&self, like: &Like) -> Result<bool, DomainError>;

    /// Returns false when there was nothing to remove.
    async fn delete(&self, like: &Like) -> Result<bool, DomainError>;
}
