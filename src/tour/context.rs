//! Runtime context captured once per sequence construction.

use crate::host::{DomPort, TimerPort};
use crate::resume::ResumeSlot;
use crate::runner::TourControls;
use std::fmt;
use std::sync::Arc;

/// Read-only input to the step provider.
///
/// The context is captured once when the sequence is constructed: the
/// branch choice and the gating counts are frozen into the descriptors'
/// closures. When the host's counts change it re-invokes the provider and
/// restarts at the current index, which is how gate state reflects the
/// latest known count before the user can advance.
#[derive(Clone)]
pub struct TourContext {
    /// Whether the user is signed in. Decides which continuation is
    /// appended after the common prefix.
    pub is_logged_in: bool,
    /// Number of studies the user currently has selected.
    pub studies_selected: usize,
    /// Controller capability handle captured by entry behaviors.
    pub controls: Arc<dyn TourControls>,
    /// Page surface for element lookup, mutation, and listeners.
    pub dom: Arc<dyn DomPort>,
    /// Delayed callback scheduling.
    pub timer: Arc<dyn TimerPort>,
    /// The tour's persisted resume point.
    pub resume: ResumeSlot,
}

impl fmt::Debug for TourContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourContext")
            .field("is_logged_in", &self.is_logged_in)
            .field("studies_selected", &self.studies_selected)
            .field("resume", &self.resume)
            .finish_non_exhaustive()
    }
}
