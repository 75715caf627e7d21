// Bookings domain - the lifecycle at the center of the marketplace.
//
// machines/ holds the pure transition table; actions/ orchestrates
// authorization, the credit ledger, and persistence around it.

pub mod actions;
pub mod data;
pub mod machines;
pub mod models;

pub use models::{Booking, BookingStatus};
