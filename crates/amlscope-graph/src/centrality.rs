//! Betweenness centrality via Brandes' algorithm.

use std::collections::{HashMap, VecDeque};

use crate::model::{NodeId, TransactionGraph};

/// Betweenness centrality for a directed unweighted graph given as an
/// adjacency list over dense local indices.
///
/// Scores are normalized by `(n-1)(n-2)` for `n > 2`, the conventional
/// directed-graph scaling.
pub fn betweenness_centrality(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    let mut centrality = vec![0.0f64; n];

    // Brandes: one BFS + dependency accumulation per source.
    for source in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut distance = vec![-1i64; n];

        sigma[source] = 1.0;
        distance[source] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adjacency[v] {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                centrality[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        for value in &mut centrality {
            *value *= scale;
        }
    }

    centrality
}

/// Betweenness centrality over the vertex-induced subgraph of the simple
/// projection restricted to `nodes`.
///
/// `nodes` order fixes the local index space, so results are deterministic
/// for a fixed node order.
pub fn subgraph_betweenness(
    graph: &TransactionGraph,
    nodes: &[NodeId],
) -> HashMap<NodeId, f64> {
    let local: HashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, &node)| (node, index))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (index, &node) in nodes.iter().enumerate() {
        for &next in graph.successors(node) {
            if let Some(&local_next) = local.get(&next) {
                adjacency[index].push(local_next);
            }
        }
    }

    let scores = betweenness_centrality(&adjacency);
    nodes
        .iter()
        .zip(scores)
        .map(|(&node, score)| (node, score))
        .collect()
}
