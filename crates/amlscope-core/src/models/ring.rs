//! Consolidated fraud-ring records.

use serde::{Deserialize, Serialize};

/// A group of accounts jointly flagged by one detector invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudRing {
    /// Stable identifier, e.g. `CYCLE_3` or `SMURF_OUT_8f2a`.
    pub ring_id: String,
    /// Human-readable pattern description.
    pub pattern_type: String,
    /// Member accounts in detection order (hub or root first).
    pub nodes: Vec<String>,
    /// Ring score as assigned by the emitting detector.
    pub score: u32,
    /// Number of member accounts.
    pub member_count: usize,
    /// Set on the top-scored ring after finalization.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_highest_risk: bool,
}

impl FraudRing {
    /// Create a ring record; `member_count` follows from `nodes`.
    pub fn new(
        ring_id: impl Into<String>,
        pattern_type: impl Into<String>,
        nodes: Vec<String>,
        score: u32,
    ) -> Self {
        let member_count = nodes.len();
        Self {
            ring_id: ring_id.into(),
            pattern_type: pattern_type.into(),
            nodes,
            score,
            member_count,
            is_highest_risk: false,
        }
    }
}
