//! Maps identity provider subjects to local user ids

use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct IdentityService {
    user_repo: Arc<dyn UserRepository>,
}

impl IdentityService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Exact-match lookup of `subject`.
    pub async fn resolve(&self, subject: &str) -> Result<Uuid, DomainError> {
        let ids = self.user_repo.find_ids_by_subject(subject).await?;

        match ids.as_slice() {
            [id] => {
                debug!("Subject resolved to user {}", id);
                Ok(*id)
            }
            [] => {
                warn!("Subject not registered: {}", subject);
                Err(DomainError::UserNotRegistered)
            }
            _ => {
                error!("{} users share subject {}", ids.len(), subject);
                Err(DomainError::AmbiguousSubject(subject.to_string()))
            }
        }
    }
}
