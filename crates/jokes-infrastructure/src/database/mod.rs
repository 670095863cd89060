//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

pub use connection::{create_pool, ping};
pub use postgres::{PgJokeRepository, PgLikeRepository, PgUserRepository};
