pub mod rating;

pub use rating::{CreateRating, Rating};
