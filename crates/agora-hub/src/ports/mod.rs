//! Ports layer for the hub.
//!
//! Hexagonal seams:
//! - Inbound (driving) port: the social graph API exposed to callers
//! - Outbound (driven) ports: policy modules, ownership ledger, receipt
//!   deployment, meta-transaction verification

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
