//! # Simple Collect Module
//!
//! Gates collects with a per-publication configuration: an optional collect
//! limit, an optional end timestamp, and an optional follower-only flag.
//! Configuration arrives as a JSON blob at attachment time; the running
//! collect count is the module's own, independent of the hub's receipt
//! counter, so a half-reverted call cannot desynchronize it (the hub rolls
//! the whole call back and re-invokes the hook on retry).

use crate::ensure_hub;
use agora_hub::ports::outbound::CollectModule;
use agora_types::{
    Address, Bytes, HubView, ModuleContext, ModuleError, ProcessCollectParams, PublicationRef,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Per-publication collect policy.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimpleCollectConfig {
    /// Maximum number of collects, `None` for unlimited.
    pub collect_limit: Option<u64>,
    /// Unix-seconds timestamp after which collecting closes, `None` for no
    /// deadline.
    pub end_timestamp: Option<u64>,
    /// Restrict collecting to followers of the publication's author.
    #[serde(default)]
    pub follower_only: bool,
}

#[derive(Debug)]
struct PublicationState {
    config: SimpleCollectConfig,
    collected: u64,
}

/// Collect module enforcing limit, deadline, and follower-only gates.
#[derive(Debug)]
pub struct SimpleCollectModule {
    hub: Address,
    publications: RwLock<HashMap<PublicationRef, PublicationState>>,
}

impl SimpleCollectModule {
    /// Creates the module bound to the given hub.
    #[must_use]
    pub fn new(hub: Address) -> Self {
        Self {
            hub,
            publications: RwLock::new(HashMap::new()),
        }
    }

    /// The number of collects recorded for a publication.
    #[must_use]
    pub fn collected(&self, publication: PublicationRef) -> u64 {
        self.publications
            .read()
            .unwrap()
            .get(&publication)
            .map_or(0, |s| s.collected)
    }
}

impl CollectModule for SimpleCollectModule {
    fn initialize_collect_module(
        &self,
        ctx: &ModuleContext,
        publication: PublicationRef,
        data: &Bytes,
    ) -> Result<Bytes, ModuleError> {
        ensure_hub(self.hub, ctx)?;
        let config: SimpleCollectConfig = if data.is_empty() {
            SimpleCollectConfig::default()
        } else {
            serde_json::from_slice(data.as_slice())
                .map_err(|e| ModuleError::InvalidConfig(e.to_string()))?
        };
        if config.collect_limit == Some(0) {
            return Err(ModuleError::InvalidConfig(
                "collect limit must be nonzero".to_string(),
            ));
        }
        debug!(publication = %publication, ?config, "collect policy attached");
        self.publications.write().unwrap().insert(
            publication,
            PublicationState {
                config,
                collected: 0,
            },
        );
        Ok(Bytes::new())
    }

    fn process_collect(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessCollectParams,
    ) -> Result<Bytes, ModuleError> {
        ensure_hub(self.hub, ctx)?;
        let mut publications = self.publications.write().unwrap();
        let state = publications
            .get_mut(&params.collected)
            .ok_or_else(|| ModuleError::NotInitialized(params.collected.to_string()))?;

        if let Some(end) = state.config.end_timestamp {
            if ctx.timestamp > end {
                return Err(ModuleError::Rejected("collect window closed".to_string()));
            }
        }
        if let Some(limit) = state.config.collect_limit {
            if state.collected >= limit {
                return Err(ModuleError::Rejected("collect limit reached".to_string()));
            }
        }
        if state.config.follower_only {
            let author = params.collected.profile_id;
            if params.collector_profile_id != author
                && !view.is_following(params.collector_profile_id, author)
            {
                return Err(ModuleError::Rejected(
                    "collector does not follow author".to_string(),
                ));
            }
        }

        state.collected += 1;
        Ok(Bytes::new())
    }
}

// =============================================================================
// TESTS
// =============================================================================
