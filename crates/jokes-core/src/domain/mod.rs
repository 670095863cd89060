//! Domain entities

pub mod joke;
pub mod like;
pub mod user;

pub use joke::{Joke, JokeView};
pub use like::Like;
pub use user::User;
