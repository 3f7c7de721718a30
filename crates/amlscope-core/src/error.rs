//! Error types for the fraud-analysis engine.

use thiserror::Error;

/// Main error type for engine operations.
///
/// Precondition violations are surfaced from the engine constructor before
/// any analysis state is published. Detector-local computational failures
/// are not represented here; they degrade to "no findings" inside the
/// engine and never propagate.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The ingestion adapter delivered a malformed ledger.
    #[error("Invalid ledger: {0}")]
    InvalidLedger(String),

    /// A record carries an empty account identifier.
    #[error("Invalid ledger: record {row} has an empty {side} identifier")]
    EmptyAccountId {
        /// Zero-based record index.
        row: usize,
        /// Which endpoint was empty ("sender" or "receiver").
        side: &'static str,
    },

    /// A record violates the `amount > 0` contract.
    #[error("Invalid ledger: record {row} has non-positive amount {amount}")]
    NonPositiveAmount {
        /// Zero-based record index.
        row: usize,
        /// The offending amount.
        amount: rust_decimal::Decimal,
    },

    /// Configuration failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A graph algorithm exhausted its exploration budget.
    #[error("Algorithm budget exhausted: {0}")]
    BudgetExhausted(String),
}

impl EngineError {
    /// Create an invalid-ledger error.
    pub fn invalid_ledger(msg: impl Into<String>) -> Self {
        Self::InvalidLedger(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a budget-exhausted error.
    pub fn budget(msg: impl Into<String>) -> Self {
        Self::BudgetExhausted(msg.into())
    }

    /// Check if this error is a ledger precondition violation.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidLedger(_) | Self::EmptyAccountId { .. } | Self::NonPositiveAmount { .. }
        )
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
