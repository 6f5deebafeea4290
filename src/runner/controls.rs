//! The capability interface steps use to influence flow.

/// Controller operations available to step behaviors.
///
/// Entry behaviors receive this as a shared handle instead of capturing the
/// controller itself, which keeps step definitions testable in isolation: a
/// test can supply a recording implementation and assert on the calls.
///
/// All operations are idempotent and become no-ops once the tour has ended,
/// so a handler firing late against a finished tour is harmless.
pub trait TourControls: Send + Sync {
    /// Lock or unlock advancement. While locked, the default advance
    /// control is suppressed.
    fn set_lock(&self, locked: bool);

    /// Request a jump to an absolute index, or clear a pending request
    /// with `None`. A requested jump is resolved by activating that index
    /// and firing its entry behavior exactly once.
    fn set_goto_step(&self, target: Option<usize>);

    /// Terminate the tour unconditionally.
    fn end_tour(&self);
}
