// Encore - marketplace API core
//
// Venues (credit-holding buyers) book providers (bookable sellers) through
// time-boxed bookings paid from a prepaid per-venue credit balance. This
// crate owns the booking lifecycle and credit ledger; identity, payload
// validation, and reporting are external collaborators.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
