//! Report assembly: subgraph selection, per-node totals and history,
//! shadow-boss centrality, and the serialized payload types.

use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use amlscope_core::models::{FraudRing, PrimaryLabel};
use amlscope_core::EngineConfig;
use amlscope_graph::centrality::subgraph_betweenness;
use amlscope_graph::{NodeId, TransactionGraph};

use crate::country::CountryStore;
use crate::scoring::ScoreBoard;

/// Flat score bonus applied to each shadow boss.
const SHADOW_BOSS_BONUS: u32 = 30;

/// Rendered-node fallback when nothing is suspicious.
const FALLBACK_RENDER_COUNT: usize = 100;

/// Denominator of the top-centrality band: the threshold sits at the
/// `max(1, n / CENTRALITY_BAND)`-th largest score.
const CENTRALITY_BAND: usize = 33;

/// The externally visible analysis result.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    /// Headline aggregates.
    pub analytics: Analytics,
    /// Node records followed by edge records, ready for the renderer.
    pub graph_data: Vec<GraphElement>,
    /// Consolidated rings, capped and sorted by descending score.
    pub fraud_rings: Vec<FraudRing>,
    /// Completion marker.
    pub summary: String,
}

/// Headline aggregates over the whole run.
#[derive(Debug, Serialize)]
pub struct Analytics {
    /// Ledger size.
    pub total_transactions: usize,
    /// Size of the suspicious set (shadow bosses included).
    pub flagged_entities: usize,
    /// Accounts over the freeze threshold.
    pub freeze_recommendations: usize,
    /// Highest per-account score.
    pub max_risk_score: u32,
}

/// One renderable element: a node or an edge.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GraphElement {
    /// An account node.
    Node {
        /// Node payload.
        data: NodeData,
    },
    /// A collapsed transaction edge.
    Edge {
        /// Edge payload.
        data: EdgeData,
    },
}

/// Rendered account record.
#[derive(Debug, Serialize)]
pub struct NodeData {
    /// Account id.
    pub id: String,
    /// Display label: account id plus country tag.
    pub label: String,
    /// Assigned ISO-2 country.
    pub country: String,
    /// Whether any detector (or the centrality pass) flagged the account.
    pub is_suspicious: bool,
    /// Displayed primary label.
    pub fraud_type: PrimaryLabel,
    /// Accumulated score, shadow-boss bonus included.
    pub risk_score: u32,
    /// Number of detector hits.
    pub fraud_count: u32,
    /// Sum sent across the full ledger.
    pub total_sent: f64,
    /// Sum received across the full ledger.
    pub total_received: f64,
    /// Capped transaction history.
    pub history: Vec<HistoryEntry>,
    /// Freeze advisory.
    pub recommend_freeze: bool,
}

/// One history line for a rendered account.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// Direction relative to the account.
    #[serde(rename = "type")]
    pub direction: HistoryDirection,
    /// The other endpoint.
    pub counterparty: String,
    /// Transaction amount.
    pub amount: f64,
    /// Transaction instant, RFC 3339.
    pub time: String,
    /// Originating transaction id.
    pub tx_id: String,
}

/// Direction of a history entry.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryDirection {
    /// The account sent the funds.
    Sent,
    /// The account received the funds.
    Received,
}

/// Rendered edge record (parallel edges collapsed to the representative).
#[derive(Debug, Serialize)]
pub struct EdgeData {
    /// Sending account.
    pub source: String,
    /// Receiving account.
    pub target: String,
    /// Representative amount, fixed two decimals.
    pub amount: String,
    /// Representative timestamp, RFC 3339.
    pub timestamp: String,
    /// Both endpoints suspicious.
    pub is_fraudulent: bool,
}

/// Assemble the report from the frozen detector state.
///
/// The centrality pass runs here, on the rendered subgraph only, and is
/// the one place outside `assign_points` that mutates scores (the
/// shadow-boss bonus and suspicious-set promotion). The freeze set is
/// computed from pre-boss scores; a shadow boss is freeze-recommended
/// regardless.
pub(crate) fn assemble(
    graph: &TransactionGraph,
    countries: &CountryStore,
    config: &EngineConfig,
    scores: &mut ScoreBoard,
    total_transactions: usize,
) -> AnalysisReport {
    let nodes_to_render = select_nodes(graph, scores, config);
    let rendered: HashSet<NodeId> = nodes_to_render.iter().copied().collect();

    let (centrality, threshold) = centrality_threshold(graph, &nodes_to_render);

    let (totals, histories) = collect_activity(graph, &rendered, config);

    // Freeze set from pre-boss scores.
    let frozen: HashSet<NodeId> = scores
        .suspicious_nodes()
        .filter(|&node| scores.points(node) >= config.freeze_threshold_score)
        .collect();

    let mut graph_data = Vec::with_capacity(nodes_to_render.len());
    for &node in &nodes_to_render {
        let centrality_score = centrality.get(node).copied().flatten().unwrap_or(0.0);
        let is_boss = centrality_score > 0.0 && centrality_score >= threshold;

        let mut fraud_type = scores.primary_label(node);
        if is_boss {
            scores.add_bonus(node, SHADOW_BOSS_BONUS);
            scores.mark_suspicious(node);
            fraud_type = fraud_type.promote_to_shadow_boss();
        }

        let account = graph.account(node);
        let country = countries.country(node);
        let (sent, received) = totals[node];
        graph_data.push(GraphElement::Node {
            data: NodeData {
                id: account.to_string(),
                label: format!("{account}\n[{country}]"),
                country: country.to_string(),
                is_suspicious: scores.is_suspicious(node),
                fraud_type,
                risk_score: scores.points(node),
                fraud_count: scores.fraud_count(node),
                total_sent: sent.to_f64().unwrap_or(0.0),
                total_received: received.to_f64().unwrap_or(0.0),
                history: histories[node].clone(),
                recommend_freeze: frozen.contains(&node) || is_boss,
            },
        });
    }

    // Edge records use the post-centrality suspicious set, so an edge into
    // a shadow boss reads as fraudulent.
    for edge in graph.representative_edges() {
        if !rendered.contains(&edge.source) || !rendered.contains(&edge.target) {
            continue;
        }
        graph_data.push(GraphElement::Edge {
            data: EdgeData {
                source: graph.account(edge.source).to_string(),
                target: graph.account(edge.target).to_string(),
                amount: format!("{:.2}", edge.amount.to_f64().unwrap_or(0.0)),
                timestamp: edge.timestamp.to_rfc3339(),
                is_fraudulent: scores.is_suspicious(edge.source)
                    && scores.is_suspicious(edge.target),
            },
        });
    }

    debug!(
        rendered = nodes_to_render.len(),
        flagged = scores.suspicious_count(),
        "payload assembly complete"
    );

    AnalysisReport {
        analytics: Analytics {
            total_transactions,
            flagged_entities: scores.suspicious_count(),
            freeze_recommendations: frozen.len(),
            max_risk_score: scores.max_points(),
        },
        graph_data,
        fraud_rings: scores.rings().to_vec(),
        summary: "Analysis Complete".to_string(),
    }
}

/// Rendered node set: the suspicious set expanded by one hop, or the first
/// nodes of the graph when nothing is suspicious. Selection and truncation
/// follow node order, so the set is deterministic.
fn select_nodes(
    graph: &TransactionGraph,
    scores: &ScoreBoard,
    config: &EngineConfig,
) -> Vec<NodeId> {
    let selected: Vec<NodeId> = if scores.suspicious_count() == 0 {
        graph.node_ids().take(FALLBACK_RENDER_COUNT).collect()
    } else {
        let mut keep: HashSet<NodeId> = scores.suspicious_nodes().collect();
        for node in scores.suspicious_nodes() {
            keep.extend(graph.successors(node).iter().copied());
            keep.extend(graph.predecessors(node).iter().copied());
        }
        graph.node_ids().filter(|node| keep.contains(node)).collect()
    };

    let mut nodes = selected;
    nodes.truncate(config.max_nodes_to_render);
    nodes
}

/// Centrality scores for the rendered subgraph and the shadow-boss
/// threshold (the top ~3% cut of the descending score list).
fn centrality_threshold(
    graph: &TransactionGraph,
    nodes: &[NodeId],
) -> (Vec<Option<f64>>, f64) {
    if nodes.is_empty() {
        return (vec![None; graph.node_count()], 1.0);
    }

    let by_node = subgraph_betweenness(graph, nodes);

    let mut descending: Vec<f64> = by_node.values().copied().collect();
    descending.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let take = (descending.len() / CENTRALITY_BAND).max(1);
    let threshold = descending.get(take - 1).copied().unwrap_or(1.0);

    let mut centrality = vec![None; graph.node_count()];
    for (node, score) in by_node {
        centrality[node] = Some(score);
    }
    (centrality, threshold)
}

/// Full-ledger totals and capped history for every rendered node.
#[allow(clippy::type_complexity)]
fn collect_activity(
    graph: &TransactionGraph,
    rendered: &HashSet<NodeId>,
    config: &EngineConfig,
) -> (Vec<(Decimal, Decimal)>, Vec<Vec<HistoryEntry>>) {
    let mut totals = vec![(Decimal::ZERO, Decimal::ZERO); graph.node_count()];
    let mut histories: Vec<Vec<HistoryEntry>> = vec![Vec::new(); graph.node_count()];

    for edge in graph.edges() {
        let amount = edge.amount.to_f64().unwrap_or(0.0);
        let time = edge.timestamp.to_rfc3339();

        if rendered.contains(&edge.source) {
            totals[edge.source].0 += edge.amount;
            if histories[edge.source].len() < config.max_history_per_node {
                histories[edge.source].push(HistoryEntry {
                    direction: HistoryDirection::Sent,
                    counterparty: graph.account(edge.target).to_string(),
                    amount,
                    time: time.clone(),
                    tx_id: edge.transaction_id.clone(),
                });
            }
        }
        if rendered.contains(&edge.target) {
            totals[edge.target].1 += edge.amount;
            if histories[edge.target].len() < config.max_history_per_node {
                histories[edge.target].push(HistoryEntry {
                    direction: HistoryDirection::Received,
                    counterparty: graph.account(edge.source).to_string(),
                    amount,
                    time,
                    tx_id: edge.transaction_id.clone(),
                });
            }
        }
    }

    (totals, histories)
}
