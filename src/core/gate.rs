//! Gate predicates for advancement control.
//!
//! Gates are pure boolean functions over the host's selection count. They
//! decide whether a gating step may release its lock, keeping threshold
//! policy out of the entry behaviors themselves.

use std::fmt;

/// Pure predicate that determines whether a gated step opens.
///
/// A gate is evaluated against the count captured in the tour context at
/// entry time. `check` returning `true` means advancement may be unlocked.
///
/// # Example
///
/// ```rust
/// use guidepost::core::Gate;
///
/// // Open only once more than one study is selected.
/// let gate = Gate::more_than(1);
///
/// assert!(!gate.check(0));
/// assert!(!gate.check(1));
/// assert!(gate.check(2));
/// ```
pub struct Gate {
    predicate: Box<dyn Fn(usize) -> bool + Send + Sync>,
}

impl Gate {
    /// Create a gate from a pure predicate over the selection count.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        Gate {
            predicate: Box::new(predicate),
        }
    }

    /// Gate that opens strictly above `threshold`.
    ///
    /// The comparison is `count > threshold`, not `>=`. The boundary matters:
    /// `more_than(1)` stays closed at exactly one selection.
    pub fn more_than(threshold: usize) -> Self {
        Gate::new(move |count| count > threshold)
    }

    /// Evaluate the gate against the latest known count.
    pub fn check(&self, count: usize) -> bool {
        (self.predicate)(count)
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate").finish_non_exhaustive()
    }
}
