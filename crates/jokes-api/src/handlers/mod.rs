pub mod health;
pub mod jokes;
pub mod user;
