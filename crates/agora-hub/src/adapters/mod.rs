//! # Adapters
//!
//! In-memory implementations of the hub's driven ports: the ownership
//! ledger, the receipt deployer, the module registry, and the
//! meta-transaction verifier. Production deployments swap these for
//! adapters that talk to the real collaborators.

mod ledger;
mod receipts;
mod registry;
mod verifier;

pub use ledger::InMemoryLedger;
pub use receipts::KeccakReceiptDeployer;
pub use registry::ModuleRegistry;
pub use verifier::NonceTrackingVerifier;
