// Credits domain - the per-venue prepaid balance and its money log.
//
// `reserve` is the one operation that must be a single conditional update
// at the storage layer; see models/ledger.rs.

pub mod actions;
pub mod data;
pub mod models;

pub use models::{Balance, CreditLedger, Transaction, TxType};
