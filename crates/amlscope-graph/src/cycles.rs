//! Bounded simple-cycle enumeration on the simple projection.

use amlscope_core::error::{EngineError, EngineResult};

use crate::model::{NodeId, TransactionGraph};

/// Exploration limits for cycle enumeration.
///
/// Enumeration on an adversarial ledger can blow up combinatorially; when
/// either limit trips, the whole run is abandoned with an error so the
/// caller can degrade to "no cycles found" without recording partial
/// results.
#[derive(Debug, Clone, Copy)]
pub struct CycleBudget {
    /// Maximum DFS edge traversals across the whole enumeration.
    pub max_traversals: usize,
    /// Maximum number of cycles collected.
    pub max_cycles: usize,
}

impl Default for CycleBudget {
    fn default() -> Self {
        Self {
            max_traversals: 2_000_000,
            max_cycles: 100_000,
        }
    }
}

/// Enumerate simple cycles of length `<= max_length`, each exactly once.
///
/// Each cycle is reported anchored at its minimal node id: the DFS roots
/// ascend through the node order and only visit larger ids, so a cycle is
/// discovered precisely when rooted at its smallest member. Output order is
/// therefore a pure function of the graph's node order.
pub fn enumerate_cycles(
    graph: &TransactionGraph,
    max_length: usize,
    budget: CycleBudget,
) -> EngineResult<Vec<Vec<NodeId>>> {
    let mut cycles = Vec::new();
    if max_length == 0 {
        return Ok(cycles);
    }

    let mut traversals = 0usize;
    let mut on_path = vec![false; graph.node_count()];

    for root in graph.node_ids() {
        let mut path = vec![root];
        on_path[root] = true;
        dfs(
            graph,
            root,
            root,
            max_length,
            &budget,
            &mut traversals,
            &mut path,
            &mut on_path,
            &mut cycles,
        )?;
        on_path[root] = false;
    }

    Ok(cycles)
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    graph: &TransactionGraph,
    root: NodeId,
    current: NodeId,
    max_length: usize,
    budget: &CycleBudget,
    traversals: &mut usize,
    path: &mut Vec<NodeId>,
    on_path: &mut [bool],
    cycles: &mut Vec<Vec<NodeId>>,
) -> EngineResult<()> {
    for &next in graph.successors(current) {
        *traversals += 1;
        if *traversals > budget.max_traversals {
            return Err(EngineError::budget(format!(
                "cycle enumeration exceeded {} traversals",
                budget.max_traversals
            )));
        }

        if next == root {
            if cycles.len() >= budget.max_cycles {
                return Err(EngineError::budget(format!(
                    "cycle enumeration exceeded {} cycles",
                    budget.max_cycles
                )));
            }
            cycles.push(path.clone());
        } else if next > root && !on_path[next] && path.len() < max_length {
            path.push(next);
            on_path[next] = true;
            dfs(
                graph, root, next, max_length, budget, traversals, path, on_path, cycles,
            )?;
            on_path[next] = false;
            path.pop();
        }
    }

    Ok(())
}
