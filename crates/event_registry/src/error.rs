//! Error types for the event registry

/// Errors raised by listeners and surfaced through `emit`
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Failure reported by a listener body
    #[error("Handler execution failed: {0}")]
    HandlerExecution(String),

    /// A listener failed while an event was being dispatched
    #[error("Listener {listener} failed while handling '{event}': {source}")]
    ListenerFailed {
        /// Event name being dispatched
        event: String,
        /// Diagnostic name of the failing listener
        listener: String,
        /// The error the listener returned
        #[source]
        source: Box<EventError>,
    },
}

impl EventError {
    /// Shorthand for listeners that want to report a failure
    pub fn handler(reason: impl Into<String>) -> Self {
        EventError::HandlerExecution(reason.into())
    }

    /// Returns the innermost listener-reported error
    pub fn root_cause(&self) -> &EventError {
        match self {
            EventError::ListenerFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
