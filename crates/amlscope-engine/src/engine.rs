//! The analysis engine: construction-time validation and the detector
//! pipeline.

use tracing::info;

use amlscope_core::models::Ledger;
use amlscope_core::{EngineConfig, EngineError, EngineResult};
use amlscope_graph::TransactionGraph;

use crate::country::CountryStore;
use crate::detectors::{detect_cycles, detect_geo_risk, detect_layering, detect_smurfing};
use crate::payload::{assemble, AnalysisReport};
use crate::scoring::ScoreBoard;

/// Batch fraud-analysis engine for one ledger.
///
/// Construction validates the ledger preconditions and builds the graph and
/// country stores; no analysis state is published when validation fails.
/// [`FraudEngine::run_analysis`] consumes the engine, runs the detectors in
/// their fixed order, and returns the frozen report.
pub struct FraudEngine {
    config: EngineConfig,
    ledger: Ledger,
    graph: TransactionGraph,
    countries: CountryStore,
    scores: ScoreBoard,
}

impl FraudEngine {
    /// Build an engine over a cleaned ledger.
    ///
    /// Returns a precondition error when the configuration is invalid or
    /// the ledger violates the ingestion contract (empty account ids,
    /// non-positive amounts).
    pub fn new(config: EngineConfig, ledger: Ledger) -> EngineResult<Self> {
        config
            .validate()
            .map_err(|errors| EngineError::config(errors.join("; ")))?;
        ledger.validate()?;

        let graph = TransactionGraph::from_ledger(&ledger);
        let countries = CountryStore::assign(&graph, &config);
        let scores = ScoreBoard::new(graph.node_count());

        Ok(Self {
            config,
            ledger,
            graph,
            countries,
            scores,
        })
    }

    /// Run the full detection pipeline and assemble the report.
    ///
    /// Detector order is fixed: geo-risk, smurfing, cycles, layered shells,
    /// then the centrality pass inside payload assembly. Score totals are
    /// order-independent; only the overlap promotion to the displayed
    /// primary label depends on prior labels being present.
    pub fn run_analysis(mut self) -> AnalysisReport {
        info!(
            transactions = self.ledger.len(),
            accounts = self.graph.node_count(),
            "starting ledger analysis"
        );

        detect_geo_risk(&self.graph, &self.countries, &self.config, &mut self.scores);
        detect_smurfing(&self.graph, &self.config, &mut self.scores);
        detect_cycles(&self.graph, &self.config, &mut self.scores);
        detect_layering(&self.graph, &self.config, &mut self.scores);

        self.scores.finalize_rings();

        let report = assemble(
            &self.graph,
            &self.countries,
            &self.config,
            &mut self.scores,
            self.ledger.len(),
        );

        info!(
            flagged = report.analytics.flagged_entities,
            rings = report.fraud_rings.len(),
            max_risk = report.analytics.max_risk_score,
            "ledger analysis complete"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amlscope_core::models::TransactionRecord;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructor_rejects_bad_ledger() {
        let ledger = Ledger::new(vec![TransactionRecord::new(
            "T1",
            "A",
            "B",
            dec!(-5),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        )]);
        let result = FraudEngine::new(EngineConfig::default(), ledger);
        assert!(matches!(
            result,
            Err(EngineError::NonPositiveAmount { row: 0, .. })
        ));
    }

    #[test]
    fn test_constructor_rejects_bad_config() {
        let config = EngineConfig {
            max_nodes_to_render: 0,
            ..Default::default()
        };
        let result = FraudEngine::new(config, Ledger::default());
        assert!(matches!(result, Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_running_more_detectors_never_lowers_scores() {
        // A ledger touching several patterns at once.
        let mut records: Vec<TransactionRecord> = (0..15)
            .map(|i| {
                TransactionRecord::new(
                    format!("TX_{i}"),
                    "HUB_01",
                    format!("OUT_{i:02}"),
                    dec!(1000),
                    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
                )
            })
            .collect();
        for (i, (from, to)) in [("OUT_00", "C1"), ("C1", "C2"), ("C2", "OUT_00")]
            .iter()
            .enumerate()
        {
            records.push(TransactionRecord::new(
                format!("TXC_{i}"),
                *from,
                *to,
                dec!(9000),
                Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
            ));
        }
        let ledger = Ledger::new(records);
        let config = EngineConfig::default();
        let graph = TransactionGraph::from_ledger(&ledger);
        let countries = CountryStore::assign(&graph, &config);

        let mut few = ScoreBoard::new(graph.node_count());
        detect_geo_risk(&graph, &countries, &config, &mut few);

        let mut all = ScoreBoard::new(graph.node_count());
        detect_geo_risk(&graph, &countries, &config, &mut all);
        detect_smurfing(&graph, &config, &mut all);
        detect_cycles(&graph, &config, &mut all);
        detect_layering(&graph, &config, &mut all);

        for node in graph.node_ids() {
            assert!(all.points(node) >= few.points(node));
        }
        assert!(all.suspicious_count() >= few.suspicious_count());
    }

    #[test]
    fn test_empty_ledger_analysis() {
        let engine = FraudEngine::new(EngineConfig::default(), Ledger::default()).unwrap();
        let report = engine.run_analysis();
        assert_eq!(report.analytics.total_transactions, 0);
        assert_eq!(report.analytics.flagged_entities, 0);
        assert_eq!(report.analytics.max_risk_score, 0);
        assert!(report.graph_data.is_empty());
        assert!(report.fraud_rings.is_empty());
        assert_eq!(report.summary, "Analysis Complete");
    }
}
