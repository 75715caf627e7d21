pub mod referral;

pub use referral::Referral;
