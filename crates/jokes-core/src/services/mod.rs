//! Domain services

pub mod identity_service;
pub mod joke_service;
pub mod user_service;

pub use identity_service::IdentityService;
pub use joke_service::JokeService;
pub use user_service::UserService;
