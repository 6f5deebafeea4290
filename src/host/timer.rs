//! Delayed callback scheduling.
//!
//! Steps that react to a click schedule their jump after a short settle
//! delay. The timers are fire-and-forget: once scheduled they cannot be
//! cancelled, and the callbacks stay harmless because listener removal and
//! the controller's end state guard them.

use std::time::Duration;

/// Callback fired once when a scheduled delay elapses.
pub type TimerCallback = Box<dyn FnOnce() + Send>;

/// Fire-and-forget delayed execution provided by the host event loop.
pub trait TimerPort: Send + Sync {
    /// Run `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: TimerCallback);
}
