//! # amlscope-engine
//!
//! The fraud-detection pipeline: given a cleaned transaction ledger, run a
//! fixed sequence of pattern detectors, accumulate per-account risk scores
//! and labels, consolidate findings into fraud rings, and assemble the
//! report payload for the visualization layer.
//!
//! ## Pipeline
//!
//! ```text
//! FraudEngine::new (precondition checks, graph build, country assignment)
//!         |
//! geo-risk -> smurfing -> cycles -> layered shells
//!         |                  (each writes through ScoreBoard::assign_points)
//! ring finalization (sort, tie-break, cap)
//!         |
//! payload assembly (node selection, totals/history, shadow-boss centrality)
//! ```
//!
//! The engine is single-threaded and batch: one ledger in, one frozen
//! [`AnalysisReport`] out. Detector-local failures (e.g. the cycle
//! enumeration budget) degrade to "no findings" and never propagate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use amlscope_core::{EngineConfig, Ledger};
//! use amlscope_engine::FraudEngine;
//!
//! let engine = FraudEngine::new(EngineConfig::default(), ledger)?;
//! let report = engine.run_analysis();
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod country;
mod detectors;
mod engine;
mod payload;
mod scoring;

pub use country::CountryStore;
pub use engine::FraudEngine;
pub use payload::{
    AnalysisReport, Analytics, EdgeData, GraphElement, HistoryDirection, HistoryEntry, NodeData,
};
pub use scoring::ScoreBoard;
