//! Cross-crate integration flows.

pub mod fixtures;
pub mod governance_flows;
pub mod graph_flows;
pub mod meta_tx_flows;
pub mod module_flows;
