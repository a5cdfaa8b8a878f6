//! # Agora Test Suite
//!
//! Unified test crate exercising the hub, the stock policy modules, and the
//! in-memory adapters together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/integration/
//! ├── fixtures.rs          # Shared hub/profile builders
//! ├── graph_flows.rs       # Publications, follows, blocks, referrers
//! ├── module_flows.rs      # Stock policy modules end to end
//! ├── governance_flows.rs  # Whitelists, pause states, executors
//! └── meta_tx_flows.rs     # Signature-relayed entry points
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p agora-tests
//! cargo test -p agora-tests integration::graph_flows::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
