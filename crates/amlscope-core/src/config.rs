//! Configuration for the fraud-analysis engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tuning surface for every detector and for payload assembly.
///
/// Two field sets exist in production deployments; `default()` carries the
/// standard thresholds and `strict()` the tightened review profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on enumerated cycle length.
    pub cycle_max_length: usize,
    /// Points per completed loop traversal, applied to every cycle member.
    pub cycle_base_points: u32,
    /// A layering chain must strictly exceed this length to qualify.
    pub layer_min_depth: usize,
    /// Points for each member of a qualifying layering chain.
    pub layer_points: u32,
    /// Distinct-counterparty threshold for fan-in/fan-out detection.
    pub smurf_min_unique_accounts: usize,
    /// Per-transaction cap for the structuring subset.
    pub smurf_max_amount: Decimal,
    /// Uniformity test coefficient: uniform iff sigma < tolerance * mean.
    pub smurf_std_dev_tolerance: f64,
    /// Points for a fan hub with uniform amounts; halved when non-uniform.
    pub smurf_points: u32,
    /// High-risk jurisdictions (ISO-2).
    pub high_risk_countries: Vec<String>,
    /// Standard jurisdictions used for non-high-risk assignment (ISO-2).
    pub standard_countries: Vec<String>,
    /// Points for each endpoint of a suspicious cross-border transaction.
    pub geo_risk_points: u32,
    /// Score at or above which an account is recommended for freezing.
    pub freeze_threshold_score: u32,
    /// Cap on the rendered node set.
    pub max_nodes_to_render: usize,
    /// Cap on per-node transaction history in the report.
    pub max_history_per_node: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cycle_max_length: 6,
            cycle_base_points: 10,
            layer_min_depth: 3,
            layer_points: 15,
            smurf_min_unique_accounts: 15,
            smurf_max_amount: Decimal::from(3_000),
            smurf_std_dev_tolerance: 0.15,
            smurf_points: 20,
            high_risk_countries: to_strings(&["KY", "KP", "RU", "PA", "SY", "IR"]),
            standard_countries: to_strings(&["IN", "US", "GB", "AE", "SG"]),
            geo_risk_points: 15,
            freeze_threshold_score: 20,
            max_nodes_to_render: 800,
            max_history_per_node: 50,
        }
    }
}

fn to_strings(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

impl EngineConfig {
    /// Tightened review profile: wider structuring net, higher freeze bar,
    /// shorter history.
    pub fn strict() -> Self {
        Self {
            smurf_max_amount: Decimal::from(10_000),
            freeze_threshold_score: 40,
            max_history_per_node: 30,
            ..Default::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.cycle_max_length < 3 {
            errors.push(format!(
                "cycle_max_length must be at least 3 (cycles of length <= 2 are ignored), got {}",
                self.cycle_max_length
            ));
        }

        if self.smurf_max_amount <= Decimal::ZERO {
            errors.push(format!(
                "smurf_max_amount must be positive, got {}",
                self.smurf_max_amount
            ));
        }

        if self.smurf_min_unique_accounts == 0 {
            errors.push("smurf_min_unique_accounts must be non-zero".to_string());
        }

        if !(0.0..=1.0).contains(&self.smurf_std_dev_tolerance) {
            errors.push(format!(
                "smurf_std_dev_tolerance must be within [0.0, 1.0], got {}",
                self.smurf_std_dev_tolerance
            ));
        }

        if self.high_risk_countries.is_empty() {
            errors.push("high_risk_countries must not be empty".to_string());
        }

        if self.standard_countries.is_empty() {
            errors.push("standard_countries must not be empty".to_string());
        }

        if self.max_nodes_to_render == 0 {
            errors.push("max_nodes_to_render must be non-zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
