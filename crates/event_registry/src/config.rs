//! Registry configuration.
//!
//! Both structures deserialize with every field optional so they can be
//! embedded as tables in an application's TOML configuration.

use serde::{Deserialize, Serialize};

/// Default reserved wildcard for broadcast registries
pub const DEFAULT_WILDCARD: &str = "*";

fn default_wildcard() -> String {
    DEFAULT_WILDCARD.to_string()
}

/// Settings shared by every registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Event names emitted often enough that a miss should not be logged
    #[serde(default)]
    pub quiet_events: Vec<String>,
}

impl RegistryConfig {
    pub fn is_quiet(&self, event_name: &str) -> bool {
        self.quiet_events.iter().any(|name| name == event_name)
    }
}

/// Which sequence a once-listener is removed from during a wildcard emit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnceRemoval {
    /// Remove from the event currently being fanned out to
    #[default]
    PerEvent,
    /// Aim the removal at the wildcard name itself. Once-listeners on ordinary
    /// events therefore survive a wildcard emit, matching the historical
    /// emitter this registry replaces.
    WildcardName,
}

/// Settings for [`BroadcastRegistry`](crate::BroadcastRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Reserved name that fans an emit out to every event
    #[serde(default = "default_wildcard")]
    pub wildcard: String,
    #[serde(default)]
    pub once_removal: OnceRemoval,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            wildcard: default_wildcard(),
            once_removal: OnceRemoval::default(),
        }
    }
}
