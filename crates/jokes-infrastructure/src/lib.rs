//! # Jokes Infrastructure
//!
//! PostgreSQL adapters for the jokes repository ports.

pub mod database;

pub use database::{create_pool, ping, PgJokeRepository, PgLikeRepository, PgUserRepository};
