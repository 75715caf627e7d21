// Accounts domain - venue and provider identities.

pub mod actions;
pub mod data;
pub mod models;

pub use models::Account;
