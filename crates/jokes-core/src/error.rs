//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not registered")]
    UserNotRegistered,

    #[error("Multiple users registered for subject: {0}")]
    AmbiguousSubject(String),

    #[error("Subject already registered")]
    SubjectAlreadyRegistered,

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Joke not found: {0}")]
    JokeNotFound(Uuid),

    #[error("Joke {0} belongs to another user")]
    NotJokeAuthor(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
