//! User domain entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered user, bound to exactly one identity provider subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    /// `sub` claim issued by the identity provider. Never exposed over HTTP.
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub openid_sub: String,

    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    pub username: String,
}

impl User {
    pub fn new(openid_sub: String, username: String) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            openid_sub,
            username: username.trim().to_string(),
        };

        user.validate()?;
        Ok(user)
    }
}
