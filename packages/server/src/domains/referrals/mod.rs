// Referral domain - invite codes and loyalty rewards.
//
// Deliberately loosely coupled to the credit ledger: loyalty points are a
// separate currency and never convert into booking credits.

pub mod actions;
pub mod code;
pub mod models;

pub use actions::REFERRAL_REWARD_POINTS;
pub use models::Referral;
