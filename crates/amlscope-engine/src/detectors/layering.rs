//! Layered-shell detection: pass-through chains rooted at source-only
//! accounts.

use tracing::debug;

use amlscope_core::models::{FraudLabel, FraudRing};
use amlscope_core::EngineConfig;
use amlscope_graph::chains::discovery_chain;
use amlscope_graph::TransactionGraph;

use crate::detectors::short_id;
use crate::scoring::ScoreBoard;

/// Detect layering chains: BFS from every source root (outbound flow, no
/// inbound) down to `layer_min_depth + 1` hops. A chain qualifies when it
/// strictly exceeds `layer_min_depth` members, so with the default depth of
/// 3 a chain of exactly 4 accounts passes.
pub(crate) fn detect_layering(
    graph: &TransactionGraph,
    config: &EngineConfig,
    scores: &mut ScoreBoard,
) {
    let mut rings = 0usize;

    for root in graph.node_ids() {
        if graph.simple_out_degree(root) == 0 || graph.simple_in_degree(root) != 0 {
            continue;
        }

        let chain = discovery_chain(graph, root, config.layer_min_depth + 1);
        if chain.len() <= config.layer_min_depth {
            continue;
        }

        scores.assign_points(&chain, config.layer_points, FraudLabel::Layered);
        scores.add_ring(FraudRing::new(
            format!("SHELL_{}", short_id(graph.account(root))),
            "Layered Structuring",
            chain.iter().map(|&n| graph.account(n).to_string()).collect(),
            config.layer_points,
        ));
        rings += 1;
    }

    debug!(rings, "layering detection complete");
}
