//! # Agora Protocol Hub
//!
//! Deterministic state machine for a decentralized social graph: profiles,
//! publications, follow/block relationships, delegated execution, and
//! governance, with externally supplied policy modules gating follows,
//! references, and collects.
//!
//! ## Core Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Publication counters are monotonic and never reused | `domain/state.rs` - `next_pub_id()` |
//! | Own records persist before untrusted module hooks run | `domain/publication.rs`, `domain/graph.rs` |
//! | Any error restores the pre-call state and event log | `service.rs` - `mutate()` snapshot |
//! | A block and a follow never coexist between two profiles | `domain/graph.rs` - forced unfollow |
//! | Config switch is an O(1) revocation of executor approvals | `domain/entities.rs` - generation counter |
//! | Emergency admin may only escalate protocol state | `domain/authorization.rs` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  adapters/  - in-memory ledger, module registry, receipt       │
//! │               deployer, nonce-tracking meta-tx verifier        │
//! └────────────────────────────────────────────────────────────────┘
//!                        ↑ implements ↑
//! ┌────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - SocialGraphApi trait                      │
//! │  ports/outbound.rs - modules, ledger, deployer, verifier       │
//! └────────────────────────────────────────────────────────────────┘
//!                        ↑ uses ↑
//! ┌────────────────────────────────────────────────────────────────┐
//! │  domain/      - entities, state, authorization, publication    │
//! │                 and graph engines, invariant checks            │
//! │  service.rs   - HubService: locking, atomicity, event log      │
//! │  events.rs    - typed event schema                             │
//! │  errors.rs    - error taxonomy                                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trust Boundary
//!
//! Policy modules are untrusted code. The hub invokes their hooks only after
//! its own records are persisted, hands them a read-only [`HubView`], and
//! treats any hook error as a full revert of the triggering call.
//!
//! [`HubView`]: agora_types::HubView

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

pub use domain::{HubState, ProtocolState, PublicationKind};
pub use errors::HubError;
pub use events::{HubEvent, WhitelistKind};
pub use ports::inbound::SocialGraphApi;
pub use service::{HubService, HubStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
