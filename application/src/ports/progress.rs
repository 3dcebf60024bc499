//! Progress notification port
//!
//! Defines the interface for reporting backend waits during a game.

use hunger_domain::RequestKind;

/// Callback for progress updates while a batch is being generated
///
/// Implementations live in the presentation layer (the countdown spinner).
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the backend request is sent
    fn on_request_start(&self, kind: RequestKind);

    /// Called when the request finishes, successfully or not
    fn on_request_complete(&self, kind: RequestKind, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _kind: RequestKind) {}
    fn on_request_complete(&self, _kind: RequestKind, _success: bool) {}
}
