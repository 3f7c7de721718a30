//! # amlscope-graph
//!
//! Graph structures and algorithms for transaction-ledger analysis:
//!
//! - [`TransactionGraph`]: a directed multigraph over interned accounts,
//!   built once per ledger, with a collapsed simple projection alongside
//! - [`cycles`]: deterministic bounded simple-cycle enumeration
//! - [`chains`]: depth-limited BFS discovery chains
//! - [`centrality`]: Brandes betweenness centrality
//!
//! All structures index the ledger once at construction; detectors then
//! iterate the prebuilt adjacency instead of rescanning records.

pub mod centrality;
pub mod chains;
pub mod cycles;
mod model;

pub use model::{EdgeId, NodeId, TransactionGraph, TxEdge};
