//! Structuring (smurfing) detection: fan-out and fan-in aggregation with a
//! dispersion test.

use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use amlscope_core::models::{FraudLabel, FraudRing};
use amlscope_core::EngineConfig;
use amlscope_graph::{NodeId, TransactionGraph};

use crate::detectors::short_id;
use crate::scoring::ScoreBoard;

/// Detect fan-out and fan-in structuring over the low-amount transaction
/// subset.
///
/// A hub qualifies when it reaches the distinct-counterparty threshold
/// within transactions at or below `smurf_max_amount`. Amounts are tested
/// for uniformity (population sigma below the tolerance fraction of the
/// mean); uniform hubs score full points, non-uniform hubs half, spokes
/// half of the hub. One ring is emitted per qualifying hub.
pub(crate) fn detect_smurfing(
    graph: &TransactionGraph,
    config: &EngineConfig,
    scores: &mut ScoreBoard,
) {
    let mut rings = 0usize;

    // Fan-out: group the low subset by sender.
    for hub in graph.node_ids() {
        let low: Vec<_> = graph
            .out_edges(hub)
            .filter(|edge| edge.amount <= config.smurf_max_amount)
            .collect();
        let counterparties = distinct(low.iter().map(|edge| edge.target));
        if counterparties.len() < config.smurf_min_unique_accounts {
            continue;
        }

        let (uniform, hub_score) = score_hub(low.iter().map(|edge| edge.amount.to_f64()), config);
        let hub_label = if uniform {
            FraudLabel::SmurfBossUniform
        } else {
            FraudLabel::SmurfBoss
        };
        scores.assign_points(&[hub], hub_score, hub_label);
        scores.assign_points(&counterparties, hub_score / 2, FraudLabel::SmurfMule);

        let pattern = if uniform {
            "Structured Fan-Out"
        } else {
            "Fan-Out Smurfing"
        };
        scores.add_ring(ring(graph, "SMURF_OUT", hub, &counterparties, pattern, hub_score));
        rings += 1;
    }

    // Fan-in: symmetric, grouped by receiver.
    for hub in graph.node_ids() {
        let low: Vec<_> = graph
            .in_edges(hub)
            .filter(|edge| edge.amount <= config.smurf_max_amount)
            .collect();
        let counterparties = distinct(low.iter().map(|edge| edge.source));
        if counterparties.len() < config.smurf_min_unique_accounts {
            continue;
        }

        let (uniform, hub_score) = score_hub(low.iter().map(|edge| edge.amount.to_f64()), config);
        let hub_label = if uniform {
            FraudLabel::SmurfTargetUniform
        } else {
            FraudLabel::SmurfTarget
        };
        scores.assign_points(&[hub], hub_score, hub_label);
        scores.assign_points(&counterparties, hub_score / 2, FraudLabel::SmurfSender);

        let pattern = if uniform {
            "Structured Fan-In"
        } else {
            "Fan-In Smurfing"
        };
        scores.add_ring(ring(graph, "SMURF_IN", hub, &counterparties, pattern, hub_score));
        rings += 1;
    }

    debug!(rings, "smurfing detection complete");
}

/// Distinct node ids in first-encountered order.
fn distinct(nodes: impl Iterator<Item = NodeId>) -> Vec<NodeId> {
    let mut seen = std::collections::HashSet::new();
    nodes.filter(|&node| seen.insert(node)).collect()
}

/// Uniformity verdict and hub score for a low-subset amount sample.
fn score_hub(amounts: impl Iterator<Item = Option<f64>>, config: &EngineConfig) -> (bool, u32) {
    let values: Vec<f64> = amounts.map(|a| a.unwrap_or(0.0)).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let std_dev = variance.sqrt();

    let uniform = mean > 0.0 && std_dev < config.smurf_std_dev_tolerance * mean;
    let score = if uniform {
        config.smurf_points
    } else {
        config.smurf_points / 2
    };
    (uniform, score)
}

fn ring(
    graph: &TransactionGraph,
    prefix: &str,
    hub: NodeId,
    counterparties: &[NodeId],
    pattern: &str,
    score: u32,
) -> FraudRing {
    let hub_account = graph.account(hub);
    let mut nodes = Vec::with_capacity(counterparties.len() + 1);
    nodes.push(hub_account.to_string());
    nodes.extend(counterparties.iter().map(|&n| graph.account(n).to_string()));
    FraudRing::new(
        format!("{prefix}_{}", short_id(hub_account)),
        pattern,
        nodes,
        score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use amlscope_core::models::{Ledger, PrimaryLabel, TransactionRecord};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn ledger_of(rows: Vec<(String, String, Decimal)>) -> Ledger {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, (from, to, amount))| {
                TransactionRecord::new(
                    format!("TX_{i}"),
                    from,
                    to,
                    amount,
                    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
                )
            })
            .collect();
        Ledger::new(records)
    }

    fn fan_out(amounts: &[i64]) -> TransactionGraph {
        let rows = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                (
                    "BOSS_0001".to_string(),
                    format!("MULE_{i:02}"),
                    Decimal::from(amount),
                )
            })
            .collect();
        TransactionGraph::from_ledger(&ledger_of(rows))
    }

    #[test]
    fn test_uniform_fan_out() {
        let config = EngineConfig::default();
        let graph = fan_out(&[1000; 15]);
        let mut scores = ScoreBoard::new(graph.node_count());

        detect_smurfing(&graph, &config, &mut scores);

        let boss = graph.node_id("BOSS_0001").unwrap();
        assert_eq!(scores.points(boss), 20);
        assert_eq!(
            scores.primary_label(boss),
            PrimaryLabel::Single(FraudLabel::SmurfBossUniform)
        );
        for i in 0..15 {
            let mule = graph.node_id(&format!("MULE_{i:02}")).unwrap();
            assert_eq!(scores.points(mule), 10);
            assert_eq!(
                scores.primary_label(mule),
                PrimaryLabel::Single(FraudLabel::SmurfMule)
            );
        }

        assert_eq!(scores.ring_count(), 1);
        let ring = &scores.rings()[0];
        assert_eq!(ring.ring_id, "SMURF_OUT_0001");
        assert_eq!(ring.pattern_type, "Structured Fan-Out");
        assert_eq!(ring.score, 20);
        assert_eq!(ring.member_count, 16);
        assert_eq!(ring.nodes[0], "BOSS_0001");
    }

    #[test]
    fn test_non_uniform_fan_out_scores_half() {
        let config = EngineConfig::default();
        let amounts: Vec<i64> = (0..15).map(|i| 100 + i * 200).collect();
        let graph = fan_out(&amounts);
        let mut scores = ScoreBoard::new(graph.node_count());

        detect_smurfing(&graph, &config, &mut scores);

        let boss = graph.node_id("BOSS_0001").unwrap();
        assert_eq!(scores.points(boss), 10);
        assert_eq!(
            scores.primary_label(boss),
            PrimaryLabel::Single(FraudLabel::SmurfBoss)
        );
        let mule = graph.node_id("MULE_00").unwrap();
        assert_eq!(scores.points(mule), 5);
        assert_eq!(scores.rings()[0].pattern_type, "Fan-Out Smurfing");
    }

    #[test]
    fn test_below_threshold_not_flagged() {
        let config = EngineConfig::default();
        let graph = fan_out(&[1000; 14]);
        let mut scores = ScoreBoard::new(graph.node_count());

        detect_smurfing(&graph, &config, &mut scores);
        assert_eq!(scores.suspicious_count(), 0);
        assert_eq!(scores.ring_count(), 0);
    }

    #[test]
    fn test_large_amounts_excluded_from_subset() {
        let config = EngineConfig::default();
        // 15 receivers but one transaction above the cap: only 14 remain.
        let mut amounts = vec![1000; 14];
        amounts.push(50_000);
        let graph = fan_out(&amounts);
        let mut scores = ScoreBoard::new(graph.node_count());

        detect_smurfing(&graph, &config, &mut scores);
        assert_eq!(scores.ring_count(), 0);
    }

    #[test]
    fn test_fan_in_symmetric() {
        let config = EngineConfig::default();
        let rows = (0..15)
            .map(|i| {
                (
                    format!("SRC_{i:02}"),
                    "SINK_9999".to_string(),
                    Decimal::from(1500),
                )
            })
            .collect();
        let graph = TransactionGraph::from_ledger(&ledger_of(rows));
        let mut scores = ScoreBoard::new(graph.node_count());

        detect_smurfing(&graph, &config, &mut scores);

        let sink = graph.node_id("SINK_9999").unwrap();
        assert_eq!(scores.points(sink), 20);
        assert_eq!(
            scores.primary_label(sink),
            PrimaryLabel::Single(FraudLabel::SmurfTargetUniform)
        );
        let src = graph.node_id("SRC_00").unwrap();
        assert_eq!(
            scores.primary_label(src),
            PrimaryLabel::Single(FraudLabel::SmurfSender)
        );

        let ring = &scores.rings()[0];
        assert_eq!(ring.ring_id, "SMURF_IN_9999");
        assert_eq!(ring.pattern_type, "Structured Fan-In");
        assert_eq!(ring.nodes[0], "SINK_9999");
    }

    #[test]
    fn test_repeat_counterparties_counted_once() {
        let config = EngineConfig::default();
        // 20 transactions to only 10 distinct receivers.
        let rows = (0..20)
            .map(|i| {
                (
                    "BOSS_0001".to_string(),
                    format!("MULE_{:02}", i % 10),
                    Decimal::from(1000),
                )
            })
            .collect();
        let graph = TransactionGraph::from_ledger(&ledger_of(rows));
        let mut scores = ScoreBoard::new(graph.node_count());

        detect_smurfing(&graph, &config, &mut scores);
        assert_eq!(scores.ring_count(), 0);
    }
}
