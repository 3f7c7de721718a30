//! Depth-limited BFS discovery chains.

use std::collections::VecDeque;

use crate::model::{NodeId, TransactionGraph};

/// Collect the BFS discovery order from `root`, following simple-projection
/// successors up to `max_depth` hops.
///
/// The chain starts with the root and appends each node the first time it
/// is discovered; revisits are suppressed. Successor order is adjacency
/// insertion order, so the chain is deterministic for a fixed ledger.
pub fn discovery_chain(
    graph: &TransactionGraph,
    root: NodeId,
    max_depth: usize,
) -> Vec<NodeId> {
    let mut chain = vec![root];
    let mut discovered = vec![false; graph.node_count()];
    discovered[root] = true;

    let mut queue = VecDeque::new();
    queue.push_back((root, 0usize));

    while let Some((node, depth)) = queue.pop_front() {
        if depth == max_depth {
            continue;
        }
        for &next in graph.successors(node) {
            if !discovered[next] {
                discovered[next] = true;
                chain.push(next);
                queue.push_back((next, depth + 1));
            }
        }
    }

    chain
}
