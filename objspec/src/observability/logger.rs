//! Logger trait and implementations.

use super::{EventType, TraceEvent};
use parking_lot::RwLock;
use tracing::{debug, info, trace, Level};

/// Receives trace events from the evaluation engine.
///
/// Loggers are passed explicitly to every validator; there is no global
/// logger.
#[cfg_attr(test, mockall::automock)]
pub trait ValidationLogger: Send + Sync {
    /// Records one event.
    fn log(&self, event: &TraceEvent);

    /// Returns false when events would be discarded, letting the engine skip
    /// building them.
    fn enabled(&self) -> bool {
        true
    }
}

/// A logger that discards all events. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl ValidationLogger for NoOpLogger {
    fn log(&self, _event: &TraceEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// A logger that forwards events to the `tracing` framework.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    level: Level,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self { level: Level::DEBUG }
    }
}

impl TracingLogger {
    /// Creates a tracing logger emitting at the given level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Returns the level events are emitted at.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }
}

impl ValidationLogger for TracingLogger {
    fn log(&self, event: &TraceEvent) {
        match self.level {
            Level::TRACE => {
                trace!(
                    event_type = %event.event_type,
                    stage = %event.stage,
                    data = %event.data,
                    "{}", event.message
                );
            }
            Level::DEBUG => {
                debug!(
                    event_type = %event.event_type,
                    stage = %event.stage,
                    data = %event.data,
                    "{}", event.message
                );
            }
            _ => {
                info!(
                    event_type = %event.event_type,
                    stage = %event.stage,
                    data = %event.data,
                    "{}", event.message
                );
            }
        }
    }
}

/// Adapts a closure into a logger.
pub struct FnLogger<F>(pub F);

impl<F> std::fmt::Debug for FnLogger<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnLogger")
    }
}

impl<F> ValidationLogger for FnLogger<F>
where
    F: Fn(&TraceEvent) + Send + Sync,
{
    fn log(&self, event: &TraceEvent) {
        (self.0)(event);
    }
}

/// A collecting logger for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingLogger {
    events: RwLock<Vec<TraceEvent>>,
}

impl CollectingLogger {
    /// Creates a new collecting logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.read().clone()
    }

    /// Returns the messages of all collected events, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.message.clone()).collect()
    }

    /// Returns events of the given type.
    #[must_use]
    pub fn events_of_type(&self, event_type: EventType) -> Vec<TraceEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl ValidationLogger for CollectingLogger {
    fn log(&self, event: &TraceEvent) {
        self.events.write().push(event.clone());
    }
}
