//! Application state shared by every request handler.

use std::sync::Arc;

use crate::config::{ConfigLoader, PolicyConfig};

/// Shared application state.
///
/// Holds the policy loaded at startup. Handlers only read it, so a single
/// `Arc` is shared across all requests without locking.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state around a loaded policy.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &PolicyConfig {
        self.config.policy()
    }
}
