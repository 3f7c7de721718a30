//! Cross-border geo-risk detection.

use std::collections::HashSet;

use tracing::debug;

use amlscope_core::models::FraudLabel;
use amlscope_core::EngineConfig;
use amlscope_graph::TransactionGraph;

use crate::country::CountryStore;
use crate::scoring::ScoreBoard;

/// Flag endpoints of cross-border transactions touching a high-risk
/// jurisdiction.
///
/// A transaction is suspicious iff its endpoint countries differ and at
/// least one is high-risk. Each account is scored once no matter how many
/// suspicious transactions it touches. No ring is emitted.
pub(crate) fn detect_geo_risk(
    graph: &TransactionGraph,
    countries: &CountryStore,
    config: &EngineConfig,
    scores: &mut ScoreBoard,
) {
    let high_risk: HashSet<&str> = config.high_risk_countries.iter().map(String::as_str).collect();

    let mut flagged = vec![false; graph.node_count()];
    let mut offshore = Vec::new();

    for edge in graph.edges() {
        let sender_country = countries.country(edge.source);
        let receiver_country = countries.country(edge.target);
        if sender_country == receiver_country {
            continue;
        }
        if !high_risk.contains(sender_country) && !high_risk.contains(receiver_country) {
            continue;
        }
        for node in [edge.source, edge.target] {
            if !flagged[node] {
                flagged[node] = true;
                offshore.push(node);
            }
        }
    }

    for &node in &offshore {
        scores.assign_points(&[node], config.geo_risk_points, FraudLabel::OffshoreRouting);
    }

    debug!(flagged = offshore.len(), "geo-risk detection complete");
}
