//! Listener callbacks and the entries a registry stores for them

use crate::error::EventError;
use compact_str::CompactString;
use std::fmt;
use std::sync::Arc;

/// Signature every listener body satisfies
pub type ListenerFn<A> = dyn Fn(&A) -> Result<(), EventError> + Send + Sync;

/// A shareable listener with identity.
///
/// Cloning a `Callback` yields a handle to the *same* listener: clones compare
/// equal and unsubscribing one clone removes registrations made with any of
/// them. Two callbacks created separately are never equal, even when they wrap
/// identical code.
///
/// ```
/// use event_registry::{Callback, EventRegistry};
///
/// let registry = EventRegistry::<i64>::new();
/// let triple = Callback::named("triple", |n: &i64| {
///     println!("{}", n * 3);
///     Ok(())
/// });
///
/// registry.subscribe("multiplication", triple.clone());
/// registry.unsubscribe("multiplication", &triple);
/// assert_eq!(registry.listener_count("multiplication"), 0);
/// ```
pub struct Callback<A> {
    func: Arc<ListenerFn<A>>,
    name: CompactString,
}

impl<A> Callback<A> {
    /// Wrap a closure; its type name becomes the diagnostic name
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&A) -> Result<(), EventError> + Send + Sync + 'static,
    {
        Self::named(std::any::type_name::<F>(), func)
    }

    /// Wrap a closure under an explicit diagnostic name
    pub fn named<F>(name: &str, func: F) -> Self
    where
        F: Fn(&A) -> Result<(), EventError> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            name: CompactString::new(name),
        }
    }

    /// Diagnostic name used in logs and errors
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the listener body
    pub fn call(&self, args: &A) -> Result<(), EventError> {
        (self.func)(args)
    }

    /// True when both handles point at the same listener
    pub fn same_as(&self, other: &Callback<A>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.func), Arc::as_ptr(&other.func))
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            name: self.name.clone(),
        }
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A> Eq for Callback<A> {}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("ptr", &Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}

/// A registration held in an event's listener sequence
pub enum ListenerEntry<A> {
    /// Fires on every emit until unsubscribed
    Plain(Callback<A>),
    /// Fires once, then its callback is unsubscribed from the event
    Once(Callback<A>),
}

impl<A> ListenerEntry<A> {
    /// The callback this entry carries
    pub fn callback(&self) -> &Callback<A> {
        match self {
            ListenerEntry::Plain(callback) | ListenerEntry::Once(callback) => callback,
        }
    }

    pub fn is_once(&self) -> bool {
        matches!(self, ListenerEntry::Once(_))
    }

    /// Removal compares against the carried callback, never the entry itself
    pub fn matches(&self, callback: &Callback<A>) -> bool {
        self.callback().same_as(callback)
    }
}

impl<A> Clone for ListenerEntry<A> {
    fn clone(&self) -> Self {
        match self {
            ListenerEntry::Plain(callback) => ListenerEntry::Plain(callback.clone()),
            ListenerEntry::Once(callback) => ListenerEntry::Once(callback.clone()),
        }
    }
}

impl<A> fmt::Debug for ListenerEntry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerEntry::Plain(callback) => f.debug_tuple("Plain").field(callback).finish(),
            ListenerEntry::Once(callback) => f.debug_tuple("Once").field(callback).finish(),
        }
    }
}
