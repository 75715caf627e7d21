// Providers domain - published open calendar windows.

pub mod actions;
pub mod data;
pub mod models;

pub use models::AvailabilityWindow;
