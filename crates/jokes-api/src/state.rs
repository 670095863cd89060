use async_trait::async_trait;
use std::sync::Arc;

use jokes_core::repositories::{JokeRepository, LikeRepository, UserRepository};
use jokes_core::services::{IdentityService, JokeService, UserService};
use jokes_security::TokenVerifier;

/// Backing-store probe used by the readiness endpoint.
#[async_trait]
pub trait Readiness: Send + Sync {
    async fn check(&self) -> Result<(), String>;
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub jokes: Arc<JokeService>,
    pub identity: Arc<IdentityService>,
    pub verifier: Arc<TokenVerifier>,
    pub readiness: Arc<dyn Readiness>,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        joke_repo: Arc<dyn JokeRepository>,
        like_repo: Arc<dyn LikeRepository>,
        verifier: Arc<TokenVerifier>,
        readiness: Arc<dyn Readiness>,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(user_repo.clone())),
            jokes: Arc::new(JokeService::new(joke_repo, like_repo)),
            identity: Arc::new(IdentityService::new(user_repo)),
            verifier,
            readiness,
        }
    }
}
