//! Property tests for the country assigner and the report caps.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use amlscope_core::{EngineConfig, Ledger, TransactionRecord};
use amlscope_engine::{CountryStore, FraudEngine, GraphElement};

proptest! {
    /// The digest-based assignment is a pure function of the account
    /// string and always lands in a configured list.
    #[test]
    fn country_assignment_deterministic_and_closed(account in ".{0,32}") {
        let config = EngineConfig::default();
        let first = CountryStore::country_for(&account, &config);
        let second = CountryStore::country_for(&account, &config);
        prop_assert_eq!(&first, &second);
        prop_assert!(
            config.high_risk_countries.contains(&first)
                || config.standard_countries.contains(&first)
        );
    }

    /// Any well-formed ledger yields a report honoring the output caps and
    /// the edge/suspicion symmetry.
    #[test]
    fn report_honors_caps(
        rows in prop::collection::vec(
            (0u8..30, 0u8..30, 1u32..20_000),
            0..60,
        )
    ) {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, &(from, to, amount))| {
                TransactionRecord::new(
                    format!("TX_{i}"),
                    format!("P{from:02}"),
                    format!("P{to:02}"),
                    Decimal::from(amount),
                    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                )
            })
            .collect();

        let config = EngineConfig::default();
        let max_nodes = config.max_nodes_to_render;
        let max_history = config.max_history_per_node;
        let report = FraudEngine::new(config, Ledger::new(records))
            .expect("generated ledger is clean")
            .run_analysis();

        prop_assert!(report.fraud_rings.len() <= 25);
        for pair in report.fraud_rings.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }

        let mut suspicious = std::collections::HashMap::new();
        let mut nodes = 0usize;
        for element in &report.graph_data {
            if let GraphElement::Node { data } = element {
                nodes += 1;
                prop_assert!(data.history.len() <= max_history);
                suspicious.insert(data.id.clone(), data.is_suspicious);
            }
        }
        prop_assert!(nodes <= max_nodes);

        for element in &report.graph_data {
            if let GraphElement::Edge { data } = element {
                let expected = suspicious[&data.source] && suspicious[&data.target];
                prop_assert_eq!(data.is_fraudulent, expected);
            }
        }
    }
}
