//! # Domain Layer (Inner Hexagon)
//!
//! Pure protocol logic: records, the Identity & Access Resolver, the
//! Publication and Graph engines, and the structural invariants.
//! NO I/O, NO async; external code is reached only through the outbound
//! ports passed in by the service layer.

pub mod authorization;
pub mod entities;
pub mod graph;
pub mod invariants;
pub mod publication;
pub mod state;

pub use entities::*;
pub use state::HubState;
