// Domain modules - each owns its models, actions, and GraphQL data types.

pub mod accounts;
pub mod auth;
pub mod bookings;
pub mod credits;
pub mod providers;
pub mod ratings;
pub mod referrals;
