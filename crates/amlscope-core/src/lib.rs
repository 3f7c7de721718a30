//! # amlscope-core
//!
//! Core domain models, configuration, and error types for the amlscope
//! fraud-analysis engine.
//!
//! This crate defines the shared vocabulary of the workspace:
//!
//! - **Models**: cleaned transaction records, the ledger they form, the
//!   closed set of fraud labels, and consolidated fraud rings
//! - **Configuration**: the tuning surface for every detector, with the
//!   default and strict presets
//! - **Errors**: typed precondition and degradation errors surfaced by the
//!   engine
//!
//! The engine itself lives in `amlscope-engine`; graph structures and
//! algorithms live in `amlscope-graph`.

pub mod config;
pub mod error;
pub mod models;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use models::{FraudLabel, FraudRing, Ledger, PrimaryLabel, TransactionRecord};
