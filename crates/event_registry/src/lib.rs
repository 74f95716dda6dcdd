//! # Event Registry
//!
//! A small, synchronous publish/subscribe registry. Independent pieces of code
//! subscribe callbacks to named events, emit those events to run every
//! matching callback in registration order, and unsubscribe again.
//!
//! ## Key Features
//!
//! - **Ordered Dispatch**: listeners run inline, in the order they subscribed
//! - **Once Listeners**: unsubscribed automatically after their first run
//! - **Callback Identity**: unsubscribe with any clone of the registered [`Callback`]
//! - **Broadcast**: [`BroadcastRegistry`] fans a wildcard emit out to every event
//! - **Re-entrant**: listeners may emit, subscribe or unsubscribe mid-dispatch
//!
//! ## Architecture
//!
//! - **EventRegistry**: event name → ordered [`ListenerEntry`] sequence
//! - **BroadcastRegistry**: wraps an `EventRegistry` and intercepts the wildcard
//! - **OnceRemoval**: selects where once-listeners are removed during fan-out
//!
//! ## Usage
//!
//! ```rust
//! use event_registry::{BroadcastRegistry, Callback, EventError};
//! use std::sync::{Arc, Mutex};
//!
//! let results = Arc::new(Mutex::new(Vec::new()));
//! let emitter = BroadcastRegistry::<i64>::new();
//!
//! let sink = results.clone();
//! let halve = Callback::named("halve", move |n: &i64| {
//!     sink.lock().unwrap().push(n / 2);
//!     Ok(())
//! });
//! let reject = Callback::named("reject", |_: &i64| Err(EventError::handler("rejected")));
//!
//! emitter.subscribe("division", halve.clone());
//! emitter.emit("division", &6)?;
//! emitter.emit("*", &10)?;
//! assert_eq!(*results.lock().unwrap(), vec![3, 5]);
//!
//! emitter.unsubscribe("division", &halve);
//! emitter.subscribe_once("division", reject);
//! assert!(emitter.emit("division", &6).is_err());
//! # Ok::<(), EventError>(())
//! ```
//!
//! ## Errors
//!
//! A listener reports failure by returning `Err(EventError)`. `emit` stops at
//! the first failure and hands it back wrapped in
//! [`EventError::ListenerFailed`]; listeners later in the sequence do not run
//! for that emit.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod listener;
pub mod registry;
pub mod stats;

pub use broadcast::BroadcastRegistry;
pub use config::{BroadcastConfig, OnceRemoval, RegistryConfig, DEFAULT_WILDCARD};
pub use error::EventError;
pub use listener::{Callback, ListenerEntry, ListenerFn};
pub use registry::EventRegistry;
pub use stats::EventStats;

/// Crate version, reported by tools embedding the registry
pub const EVENT_REGISTRY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, EventError>;

#[cfg(test)]
mod tests;
