//! Deterministic pseudo-country assignment.

use sha2::{Digest, Sha256};

use amlscope_core::EngineConfig;
use amlscope_graph::{NodeId, TransactionGraph};

/// Per-account country codes, fixed at engine construction.
///
/// Assignment is a pure function of the account string: the first 16 bytes
/// of its SHA-256 digest, read big-endian as a 128-bit integer, select the
/// jurisdiction. Roughly 8% of accounts land in the high-risk band; the
/// remainder are spread across the standard list. The same digest and
/// lists must be used across runs for the mapping to be reproducible.
#[derive(Debug, Clone)]
pub struct CountryStore {
    countries: Vec<String>,
}

impl CountryStore {
    /// Assign a country to every account in the graph.
    pub fn assign(graph: &TransactionGraph, config: &EngineConfig) -> Self {
        let countries = graph
            .node_ids()
            .map(|node| Self::country_for(graph.account(node), config))
            .collect();
        Self { countries }
    }

    /// The deterministic country for one account string.
    pub fn country_for(account: &str, config: &EngineConfig) -> String {
        let digest = Sha256::digest(account.as_bytes());
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&digest[..16]);
        let h = u128::from_be_bytes(prefix);

        if h % 100 < 8 {
            let index = (h % config.high_risk_countries.len() as u128) as usize;
            config.high_risk_countries[index].clone()
        } else {
            let index = (h % config.standard_countries.len() as u128) as usize;
            config.standard_countries[index].clone()
        }
    }

    /// Country code for a node.
    pub fn country(&self, node: NodeId) -> &str {
        &self.countries[node]
    }

    /// Fixed per-node countries, bypassing the digest.
    #[cfg(test)]
    pub(crate) fn from_vec(countries: Vec<String>) -> Self {
        Self { countries }
    }
}
