//! Named-event registry with ordered, synchronous dispatch

use crate::config::RegistryConfig;
use crate::error::EventError;
use crate::listener::{Callback, ListenerEntry};
use crate::stats::{EventStats, StatsCounters};
use compact_str::CompactString;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, trace};

/// Listener sequence for one event name, in registration order
pub(crate) type Sequence<A> = SmallVec<[ListenerEntry<A>; 4]>;

/// Event sequences in the order their names were first created.
///
/// Sequences are never removed, only emptied, so indices in `index` stay
/// valid for the registry's lifetime.
struct Slots<A> {
    index: HashMap<CompactString, usize>,
    events: Vec<(CompactString, Sequence<A>)>,
}

impl<A> Slots<A> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            events: Vec::new(),
        }
    }

    fn get(&self, event_name: &str) -> Option<&Sequence<A>> {
        self.index.get(event_name).map(|&i| &self.events[i].1)
    }

    fn get_mut(&mut self, event_name: &str) -> Option<&mut Sequence<A>> {
        match self.index.get(event_name) {
            Some(&i) => Some(&mut self.events[i].1),
            None => None,
        }
    }

    fn get_or_create(&mut self, event_name: &str) -> &mut Sequence<A> {
        let i = match self.index.get(event_name) {
            Some(&i) => i,
            None => {
                let name = CompactString::new(event_name);
                self.events.push((name.clone(), SmallVec::new()));
                let i = self.events.len() - 1;
                self.index.insert(name, i);
                i
            }
        };
        &mut self.events[i].1
    }

    fn total_listeners(&self) -> usize {
        self.events.iter().map(|(_, sequence)| sequence.len()).sum()
    }
}

/// Registry mapping event names to ordered listener sequences.
///
/// Every method takes `&self`. The internal lock is released before any
/// listener runs, so listeners may subscribe, unsubscribe or emit on the same
/// registry while it is dispatching.
///
/// ```
/// use event_registry::{Callback, EventRegistry};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let registry = EventRegistry::<u32>::new();
///
/// let sink = seen.clone();
/// registry.subscribe_once("ready", Callback::new(move |n: &u32| {
///     sink.lock().unwrap().push(*n);
///     Ok(())
/// }));
///
/// registry.emit("ready", &1).unwrap();
/// registry.emit("ready", &2).unwrap();
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// ```
pub struct EventRegistry<A> {
    slots: Mutex<Slots<A>>,
    config: RegistryConfig,
    stats: StatsCounters,
}

impl<A> EventRegistry<A> {
    /// Create an empty registry with default settings
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            slots: Mutex::new(Slots::new()),
            config,
            stats: StatsCounters::default(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register `callback` to run on every emit of `event_name`
    pub fn subscribe(&self, event_name: &str, callback: Callback<A>) {
        self.push(event_name, ListenerEntry::Plain(callback));
    }

    /// Register `callback` to run on the next emit of `event_name` only
    pub fn subscribe_once(&self, event_name: &str, callback: Callback<A>) {
        self.push(event_name, ListenerEntry::Once(callback));
    }

    fn push(&self, event_name: &str, entry: ListenerEntry<A>) {
        debug!(
            "📝 Subscribed {} to '{}' (once: {})",
            entry.callback().name(),
            event_name,
            entry.is_once()
        );
        self.slots.lock().get_or_create(event_name).push(entry);
    }

    /// Remove every registration of `callback` under `event_name`.
    ///
    /// Plain and once registrations are both matched on the callback they
    /// carry, and all copies go at once. Unknown names and callbacks are
    /// ignored.
    pub fn unsubscribe(&self, event_name: &str, callback: &Callback<A>) {
        let removed = {
            let mut slots = self.slots.lock();
            match slots.get_mut(event_name) {
                Some(sequence) => {
                    let before = sequence.len();
                    sequence.retain(|entry| !entry.matches(callback));
                    before - sequence.len()
                }
                None => 0,
            }
        };

        if removed > 0 {
            debug!(
                "🗑️ Unsubscribed {} from '{}' ({} registration(s))",
                callback.name(),
                event_name,
                removed
            );
        }
    }

    /// Invoke every listener of `event_name` in registration order.
    ///
    /// Dispatch runs over a snapshot taken on entry: listeners subscribed
    /// while it runs wait for the next emit, and once-listener removals do not
    /// skip entries already in the snapshot. The first listener error aborts
    /// the remaining invocations and is returned to the caller.
    pub fn emit(&self, event_name: &str, args: &A) -> Result<(), EventError> {
        let Some(entries) = self.snapshot(event_name) else {
            if !self.config.is_quiet(event_name) {
                debug!("No listeners for event: {}", event_name);
            }
            return Ok(());
        };

        self.stats.record_emit();
        trace!("📤 Emitting '{}' to {} listener(s)", event_name, entries.len());
        self.dispatch(event_name, &entries, args, event_name)
    }

    /// Run `entries` for `event_name`, unsubscribing fired once-listeners
    /// from `removal_target`.
    pub(crate) fn dispatch(
        &self,
        event_name: &str,
        entries: &[ListenerEntry<A>],
        args: &A,
        removal_target: &str,
    ) -> Result<(), EventError> {
        for entry in entries {
            let callback = entry.callback();
            trace!("Invoking {} for '{}'", callback.name(), event_name);

            if let Err(e) = callback.call(args) {
                self.stats.record_failure();
                error!("❌ Listener {} failed on '{}': {}", callback.name(), event_name, e);
                return Err(EventError::ListenerFailed {
                    event: event_name.to_string(),
                    listener: callback.name().to_string(),
                    source: Box::new(e),
                });
            }
            self.stats.record_invocation();

            if let ListenerEntry::Once(callback) = entry {
                self.unsubscribe(removal_target, callback);
            }
        }
        Ok(())
    }

    /// Copy of the current sequence for `event_name`
    pub(crate) fn snapshot(&self, event_name: &str) -> Option<Sequence<A>> {
        self.slots.lock().get(event_name).cloned()
    }

    /// Names in creation order, as stored
    pub(crate) fn names(&self) -> Vec<CompactString> {
        self.slots
            .lock()
            .events
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub(crate) fn stats_counters(&self) -> &StatsCounters {
        &self.stats
    }

    /// Number of registrations for `event_name`, zero when unknown
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.slots.lock().get(event_name).map_or(0, |sequence| sequence.len())
    }

    /// True once anything has subscribed to `event_name`, even if its
    /// listeners have since been removed
    pub fn has_event(&self, event_name: &str) -> bool {
        self.slots.lock().get(event_name).is_some()
    }

    /// Every known event name, in the order each was first subscribed to
    pub fn event_names(&self) -> Vec<String> {
        self.names().into_iter().map(String::from).collect()
    }

    /// Drop all listeners of `event_name`, keeping the (now empty) event
    pub fn clear(&self, event_name: &str) {
        if let Some(sequence) = self.slots.lock().get_mut(event_name) {
            sequence.clear();
        }
    }

    pub fn stats(&self) -> EventStats {
        let total = self.slots.lock().total_listeners();
        self.stats.snapshot(total)
    }
}

impl<A> Default for EventRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.lock();
        f.debug_struct("EventRegistry")
            .field("events", &slots.events.len())
            .field("listeners", &slots.total_listeners())
            .field("config", &self.config)
            .finish()
    }
}
