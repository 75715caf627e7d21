pub mod ledger;
pub mod transaction;

pub use ledger::{Balance, CreditLedger};
pub use transaction::{Transaction, TxType};
