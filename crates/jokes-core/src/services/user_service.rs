//! User registration and removal

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Binds a new user id to `subject`.
    pub async fn register(&self, subject: &str, username: &str) -> Result<User, DomainError> {
        if !self.user_repo.find_ids_by_subject(subject).await?.is_empty() {
            warn!("Registration failed: subject already registered: {}", subject);
            return Err(DomainError::SubjectAlreadyRegistered);
        }

        let user = User::new(subject.to_string(), username.to_string())?;
        let created = self.user_repo.create(&user).await?;

        info!("Registered user {} ({})", created.id, created.username);
        Ok(created)
    }

    pub async fn delete(&self, user_id: &Uuid) -> Result<(), DomainError> {
        if !self.user_repo.delete(user_id).await? {
            return Err(DomainError::UserNotFound(*user_id));
        }

        info!("Deleted user {}", user_id);
        Ok(())
    }
}
