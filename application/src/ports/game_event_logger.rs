//! Port for the structured game transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port records every
//! [`GameEvent`] in a machine-readable format (JSONL).

use hunger_domain::GameEvent;

/// Port for logging game events to a structured log.
///
/// `log` is synchronous and non-fallible; implementations swallow their
/// own write errors.
pub trait GameEventLogger: Send + Sync {
    fn log(&self, event: &GameEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoGameEventLogger;

impl GameEventLogger for NoGameEventLogger {
    fn log(&self, _event: &GameEvent) {}
}
