//! Registry variant whose wildcard emit fans out to every event

use crate::config::{BroadcastConfig, OnceRemoval, RegistryConfig};
use crate::error::EventError;
use crate::listener::Callback;
use crate::registry::EventRegistry;
use crate::stats::EventStats;
use std::fmt;
use tracing::{trace, warn};

/// An [`EventRegistry`] with a reserved wildcard name.
///
/// Emitting any other name behaves exactly like the wrapped registry.
/// Emitting the wildcard walks every event name known at that moment, in the
/// order the names were first subscribed to, and runs each name's listeners
/// in registration order. Events with no listeners left are visited and
/// contribute nothing.
///
/// Where a fired once-listener is unsubscribed during a wildcard emit is
/// chosen by [`OnceRemoval`].
///
/// ```
/// use event_registry::{BroadcastRegistry, Callback};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let registry = BroadcastRegistry::<i64>::new();
///
/// for (event, factor) in [("mul", 2), ("div", -1)] {
///     let sink = seen.clone();
///     registry.subscribe(event, Callback::new(move |n: &i64| {
///         sink.lock().unwrap().push(n * factor);
///         Ok(())
///     }));
/// }
///
/// registry.emit("*", &6).unwrap();
/// assert_eq!(*seen.lock().unwrap(), vec![12, -6]);
/// ```
pub struct BroadcastRegistry<A> {
    inner: EventRegistry<A>,
    broadcast: BroadcastConfig,
}

impl<A> BroadcastRegistry<A> {
    /// Create an empty registry using `"*"` as the wildcard
    pub fn new() -> Self {
        Self::with_configs(RegistryConfig::default(), BroadcastConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_configs(config, BroadcastConfig::default())
    }

    pub fn with_broadcast_config(broadcast: BroadcastConfig) -> Self {
        Self::with_configs(RegistryConfig::default(), broadcast)
    }

    pub fn with_configs(config: RegistryConfig, broadcast: BroadcastConfig) -> Self {
        if broadcast.wildcard.is_empty() {
            warn!("⚠️ Broadcast wildcard is empty; emitting \"\" will fan out to every event");
        }
        Self {
            inner: EventRegistry::with_config(config),
            broadcast,
        }
    }

    /// The reserved name that triggers fan-out
    pub fn wildcard(&self) -> &str {
        &self.broadcast.wildcard
    }

    pub fn broadcast_config(&self) -> &BroadcastConfig {
        &self.broadcast
    }

    /// The wrapped single-event registry
    pub fn registry(&self) -> &EventRegistry<A> {
        &self.inner
    }

    pub fn subscribe(&self, event_name: &str, callback: Callback<A>) {
        self.inner.subscribe(event_name, callback);
    }

    pub fn subscribe_once(&self, event_name: &str, callback: Callback<A>) {
        self.inner.subscribe_once(event_name, callback);
    }

    pub fn unsubscribe(&self, event_name: &str, callback: &Callback<A>) {
        self.inner.unsubscribe(event_name, callback);
    }

    /// Emit `event_name`, or every event when it is the wildcard
    pub fn emit(&self, event_name: &str, args: &A) -> Result<(), EventError> {
        if event_name != self.broadcast.wildcard {
            return self.inner.emit(event_name, args);
        }
        self.fan_out(args)
    }

    fn fan_out(&self, args: &A) -> Result<(), EventError> {
        let names = self.inner.names();
        self.inner.stats_counters().record_emit();
        trace!("📡 Broadcasting to {} event(s)", names.len());

        for name in names {
            // Each event's sequence is read when the walk reaches it.
            let Some(entries) = self.inner.snapshot(&name) else {
                continue;
            };
            let removal_target = match self.broadcast.once_removal {
                OnceRemoval::PerEvent => name.as_str(),
                OnceRemoval::WildcardName => self.broadcast.wildcard.as_str(),
            };
            self.inner.dispatch(&name, &entries, args, removal_target)?;
        }
        Ok(())
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.inner.listener_count(event_name)
    }

    pub fn has_event(&self, event_name: &str) -> bool {
        self.inner.has_event(event_name)
    }

    pub fn event_names(&self) -> Vec<String> {
        self.inner.event_names()
    }

    pub fn clear(&self, event_name: &str) {
        self.inner.clear(event_name);
    }

    pub fn stats(&self) -> EventStats {
        self.inner.stats()
    }
}

impl<A> Default for BroadcastRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for BroadcastRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastRegistry")
            .field("inner", &self.inner)
            .field("broadcast", &self.broadcast)
            .finish()
    }
}
