//! Cleaned transaction records and the ledger they form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single cleaned transaction.
///
/// Records arrive from the ingestion adapter already normalized: canonical
/// field names, parseable timestamp, strictly positive amount. Multiple
/// records between the same ordered account pair are permitted and
/// semantically distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque transaction identifier.
    pub transaction_id: String,
    /// Sending account.
    pub sender_id: String,
    /// Receiving account.
    pub receiver_id: String,
    /// Transferred amount, strictly positive.
    pub amount: Decimal,
    /// Settlement instant.
    pub timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a new record.
    pub fn new(
        transaction_id: impl Into<String>,
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            amount,
            timestamp,
        }
    }
}

/// An ordered batch of cleaned transactions.
///
/// Record order is significant: the account universe is interned in
/// first-encountered order, and that order is the fixed node order every
/// determinism contract in the engine refers to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    /// Create a ledger from cleaned records.
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    /// The records in ledger order.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Account ids in first-encountered order, senders before receivers
    /// within each record.
    pub fn accounts(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut accounts = Vec::new();
        for record in &self.records {
            for id in [record.sender_id.as_str(), record.receiver_id.as_str()] {
                if seen.insert(id) {
                    accounts.push(id);
                }
            }
        }
        accounts
    }

    /// Check the preconditions the engine constructor relies on.
    ///
    /// The ingestion adapter is contractually required to have dropped
    /// violating rows already; a failure here means the adapter is broken
    /// and no analysis state may be published.
    pub fn validate(&self) -> EngineResult<()> {
        for (row, record) in self.records.iter().enumerate() {
            if record.sender_id.is_empty() {
                return Err(EngineError::EmptyAccountId {
                    row,
                    side: "sender",
                });
            }
            if record.receiver_id.is_empty() {
                return Err(EngineError::EmptyAccountId {
                    row,
                    side: "receiver",
                });
            }
            if record.amount <= Decimal::ZERO {
                return Err(EngineError::NonPositiveAmount {
                    row,
                    amount: record.amount,
                });
            }
        }
        Ok(())
    }
}
