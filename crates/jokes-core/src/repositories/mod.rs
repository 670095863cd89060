//! Repository traits (ports)

pub mod joke_repository;
pub mod like_repository;
pub mod user_repository;

pub use joke_repository::JokeRepository;
pub use like_repository::LikeRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use joke_repository::MockJokeRepository;
#[cfg(test)]
pub use like_repository::MockLikeRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
