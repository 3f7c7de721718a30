//! Cyclic wash detection: bounded cycle enumeration with multiplicity
//! weighting.

use tracing::{debug, warn};

use amlscope_core::models::{FraudLabel, FraudRing};
use amlscope_core::EngineConfig;
use amlscope_graph::cycles::{enumerate_cycles, CycleBudget};
use amlscope_graph::TransactionGraph;

use crate::scoring::ScoreBoard;

/// Detect directed cycles in the simple projection and weight them by how
/// many complete loop traversals the parallel edges support.
///
/// `loop_completions` for a cycle is the minimum parallel-edge multiplicity
/// along its consecutive pairs. Cycles of length two or less are ignored.
/// Enumeration failure (budget exhaustion on adversarial input) degrades to
/// "no cycles found"; no partial rings are recorded.
pub(crate) fn detect_cycles(
    graph: &TransactionGraph,
    config: &EngineConfig,
    scores: &mut ScoreBoard,
) {
    let cycles = match enumerate_cycles(graph, config.cycle_max_length, CycleBudget::default()) {
        Ok(cycles) => cycles,
        Err(err) => {
            warn!(error = %err, "cycle enumeration aborted, treating as no cycles");
            return;
        }
    };

    let mut rings = 0usize;
    for (index, cycle) in cycles.iter().enumerate() {
        if cycle.len() <= 2 {
            continue;
        }

        let completions = cycle
            .iter()
            .enumerate()
            .map(|(j, &node)| graph.multiplicity(node, cycle[(j + 1) % cycle.len()]))
            .min()
            .unwrap_or(0);
        if completions == 0 {
            continue;
        }

        let points = completions as u32 * config.cycle_base_points;
        scores.assign_points(cycle, points, FraudLabel::Cycle);
        scores.add_ring(FraudRing::new(
            format!("CYCLE_{}", index + 1),
            format!("Cyclic Wash ({completions}x loops)"),
            cycle.iter().map(|&n| graph.account(n).to_string()).collect(),
            points * cycle.len() as u32,
        ));
        rings += 1;
    }

    debug!(cycles = cycles.len(), rings, "cycle detection complete");
}
