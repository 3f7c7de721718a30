//! Domain models for transaction-graph fraud analysis.

mod label;
mod ring;
mod transaction;

pub use label::{FraudLabel, PrimaryLabel};
pub use ring::FraudRing;
pub use transaction::{Ledger, TransactionRecord};
