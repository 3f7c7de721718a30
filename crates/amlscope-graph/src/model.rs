//! Directed transaction multigraph and its simple projection.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use amlscope_core::models::Ledger;

/// Dense node identifier assigned in first-encountered ledger order.
pub type NodeId = usize;

/// Dense edge identifier assigned in ledger order.
pub type EdgeId = usize;

/// One multigraph edge, corresponding to exactly one transaction.
#[derive(Debug, Clone)]
pub struct TxEdge {
    /// Edge identifier (index into the edge list).
    pub id: EdgeId,
    /// Sending node.
    pub source: NodeId,
    /// Receiving node.
    pub target: NodeId,
    /// Transaction amount.
    pub amount: Decimal,
    /// Transaction timestamp.
    pub timestamp: DateTime<Utc>,
    /// Originating transaction id.
    pub transaction_id: String,
}

/// A directed multigraph over accounts, with a collapsed simple projection.
///
/// Accounts are interned as dense `NodeId`s in first-encountered ledger
/// order; that ordering is what makes every downstream traversal
/// reproducible. Parallel edges are preserved in the multigraph; the simple
/// projection keeps the first-encountered edge per ordered pair as the
/// representative and records the parallel multiplicity separately.
#[derive(Debug, Clone, Default)]
pub struct TransactionGraph {
    accounts: Vec<String>,
    account_ids: HashMap<String, NodeId>,
    edges: Vec<TxEdge>,
    adjacency: Vec<Vec<EdgeId>>,
    reverse_adjacency: Vec<Vec<EdgeId>>,
    simple_out: Vec<Vec<NodeId>>,
    simple_in: Vec<Vec<NodeId>>,
    simple_edges: Vec<EdgeId>,
    pair_multiplicity: HashMap<(NodeId, NodeId), usize>,
}

impl TransactionGraph {
    /// Build the multigraph and simple projection in one ledger pass.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut graph = Self::default();

        for record in ledger.records() {
            let source = graph.intern(&record.sender_id);
            let target = graph.intern(&record.receiver_id);

            let id = graph.edges.len();
            graph.edges.push(TxEdge {
                id,
                source,
                target,
                amount: record.amount,
                timestamp: record.timestamp,
                transaction_id: record.transaction_id.clone(),
            });
            graph.adjacency[source].push(id);
            graph.reverse_adjacency[target].push(id);

            let multiplicity = graph.pair_multiplicity.entry((source, target)).or_insert(0);
            if *multiplicity == 0 {
                graph.simple_out[source].push(target);
                graph.simple_in[target].push(source);
                graph.simple_edges.push(id);
            }
            *multiplicity += 1;
        }

        graph
    }

    fn intern(&mut self, account: &str) -> NodeId {
        if let Some(&id) = self.account_ids.get(account) {
            return id;
        }
        let id = self.accounts.len();
        self.accounts.push(account.to_string());
        self.account_ids.insert(account.to_string(), id);
        self.adjacency.push(Vec::new());
        self.reverse_adjacency.push(Vec::new());
        self.simple_out.push(Vec::new());
        self.simple_in.push(Vec::new());
        id
    }

    /// Number of accounts.
    pub fn node_count(&self) -> usize {
        self.accounts.len()
    }

    /// Number of multigraph edges (= ledger size).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node ids in interning order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        0..self.accounts.len()
    }

    /// Account id for a node.
    pub fn account(&self, node: NodeId) -> &str {
        &self.accounts[node]
    }

    /// Node for an account id, if present.
    pub fn node_id(&self, account: &str) -> Option<NodeId> {
        self.account_ids.get(account).copied()
    }

    /// All multigraph edges in ledger order.
    pub fn edges(&self) -> &[TxEdge] {
        &self.edges
    }

    /// A multigraph edge by id.
    pub fn edge(&self, id: EdgeId) -> &TxEdge {
        &self.edges[id]
    }

    /// Outgoing multigraph edges of a node.
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = &TxEdge> {
        self.adjacency[node].iter().map(|&id| &self.edges[id])
    }

    /// Incoming multigraph edges of a node.
    pub fn in_edges(&self, node: NodeId) -> impl Iterator<Item = &TxEdge> {
        self.reverse_adjacency[node].iter().map(|&id| &self.edges[id])
    }

    /// Distinct successors in the simple projection, insertion order.
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.simple_out[node]
    }

    /// Distinct predecessors in the simple projection, insertion order.
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        &self.simple_in[node]
    }

    /// Out-degree in the simple projection.
    pub fn simple_out_degree(&self, node: NodeId) -> usize {
        self.simple_out[node].len()
    }

    /// In-degree in the simple projection.
    pub fn simple_in_degree(&self, node: NodeId) -> usize {
        self.simple_in[node].len()
    }

    /// Number of parallel edges between an ordered pair.
    pub fn multiplicity(&self, source: NodeId, target: NodeId) -> usize {
        self.pair_multiplicity
            .get(&(source, target))
            .copied()
            .unwrap_or(0)
    }

    /// Representative edges of the simple projection, one per ordered pair,
    /// in first-encountered ledger order.
    pub fn representative_edges(&self) -> impl Iterator<Item = &TxEdge> {
        self.simple_edges.iter().map(|&id| &self.edges[id])
    }
}
