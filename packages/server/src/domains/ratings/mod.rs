// Ratings domain - post-completion feedback, one per booking.

pub mod actions;
pub mod data;
pub mod models;

pub use models::Rating;
