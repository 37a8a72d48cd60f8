use std::time::Duration;

/// Debounce before rebuilding the utility stylesheet after a document load,
/// long enough for synchronous DOM mutations to settle. Not an ordering
/// guarantee: the rebuild is idempotent if it fires early.
pub const STYLE_REBUILD_DELAY: Duration = Duration::from_millis(500);

/// Work the session wants run later, on the same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    RebuildUtilityStyles,
}

/// Scheduling seam. The embedding layer owns the event loop, so the session
/// hands it `(delay, task)` pairs and expects
/// [`BridgeSession::run_deferred`](crate::BridgeSession::run_deferred) to be
/// called once the delay elapses. There is no cancellation.
pub trait TaskScheduler {
    fn schedule(&mut self, delay: Duration, task: DeferredTask);
}
