//! Shared scoring, labeling, and ring registry.

use std::collections::BTreeSet;

use amlscope_core::models::{FraudLabel, FraudRing, PrimaryLabel};
use amlscope_graph::NodeId;

/// Output cap on the consolidated ring list.
pub(crate) const MAX_RING_REPORT: usize = 25;

/// Mutable analysis state shared by all detectors.
///
/// Every store is indexed by the graph's dense node ids, so an account has
/// a score entry exactly when it is an endpoint of some transaction.
/// [`ScoreBoard::assign_points`] is the single mutation primitive;
/// detectors never touch the stores directly.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    points: Vec<u32>,
    labels: Vec<BTreeSet<FraudLabel>>,
    fraud_counts: Vec<u32>,
    suspicious: Vec<bool>,
    suspicious_count: usize,
    rings: Vec<FraudRing>,
}

impl ScoreBoard {
    /// Fresh stores for `node_count` accounts, all zeroed.
    pub fn new(node_count: usize) -> Self {
        Self {
            points: vec![0; node_count],
            labels: vec![BTreeSet::new(); node_count],
            fraud_counts: vec![0; node_count],
            suspicious: vec![false; node_count],
            suspicious_count: 0,
            rings: Vec::new(),
        }
    }

    /// Add `amount` points and `label` to each node, marking it suspicious
    /// and counting one detector hit per node.
    pub fn assign_points(&mut self, nodes: &[NodeId], amount: u32, label: FraudLabel) {
        for &node in nodes {
            self.points[node] += amount;
            self.labels[node].insert(label);
            self.fraud_counts[node] += 1;
            self.mark_suspicious(node);
        }
    }

    /// Insert a node into the suspicious set without scoring it (used by
    /// the shadow-boss promotion).
    pub fn mark_suspicious(&mut self, node: NodeId) {
        if !self.suspicious[node] {
            self.suspicious[node] = true;
            self.suspicious_count += 1;
        }
    }

    /// Add a flat bonus to one node's score (shadow-boss penalty).
    pub fn add_bonus(&mut self, node: NodeId, amount: u32) {
        self.points[node] += amount;
    }

    /// Current score of a node.
    pub fn points(&self, node: NodeId) -> u32 {
        self.points[node]
    }

    /// Highest score across all accounts, 0 when there are none.
    pub fn max_points(&self) -> u32 {
        self.points.iter().copied().max().unwrap_or(0)
    }

    /// Number of detector hits recorded for a node.
    pub fn fraud_count(&self, node: NodeId) -> u32 {
        self.fraud_counts[node]
    }

    /// Whether a node is in the suspicious set.
    pub fn is_suspicious(&self, node: NodeId) -> bool {
        self.suspicious[node]
    }

    /// Size of the suspicious set.
    pub fn suspicious_count(&self) -> usize {
        self.suspicious_count
    }

    /// Suspicious nodes in node order.
    pub fn suspicious_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.suspicious
            .iter()
            .enumerate()
            .filter_map(|(node, &flag)| flag.then_some(node))
    }

    /// The displayed primary label for a node, before any shadow-boss
    /// override.
    pub fn primary_label(&self, node: NodeId) -> PrimaryLabel {
        PrimaryLabel::from_labels(self.labels[node].iter())
    }

    /// Append a ring to the registry.
    pub fn add_ring(&mut self, ring: FraudRing) {
        self.rings.push(ring);
    }

    /// Number of rings recorded so far.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Sort rings by descending score (ties by ring id for stability), tag
    /// the top ring, and cap the list for the report.
    pub fn finalize_rings(&mut self) {
        self.rings
            .sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.ring_id.cmp(&b.ring_id)));
        self.rings.truncate(MAX_RING_REPORT);
        if let Some(first) = self.rings.first_mut() {
            first.is_highest_risk = true;
        }
    }

    /// The finalized ring list.
    pub fn rings(&self) -> &[FraudRing] {
        &self.rings
    }
}
