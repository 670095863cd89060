//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, DomainError>;

    /// Every user id bound to `openid_sub`. More than one entry means the
    /// store lost its uniqueness guarantee.
    async fn find_ids_by_subject(&self, openid_sub: &str) -> Result<Vec<Uuid>, DomainError>;

    /// Removes the user together with their jokes and likes.
    /// Returns false when no such user exists.
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}
