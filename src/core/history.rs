//! Step activation history tracking.
//!
//! Provides immutable tracking of which steps a tour instance activated and
//! when, following functional programming principles: recording returns a
//! new history rather than mutating in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single step activation.
///
/// `from` is `None` for the first activation of a tour instance (a fresh
/// start or a resume after navigation); otherwise it holds the index that
/// was active before the move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepActivation {
    /// The index that was active before this activation, if any
    pub from: Option<usize>,
    /// The index that became active
    pub to: usize,
    /// When the activation occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of step activations.
///
/// # Example
///
/// ```rust
/// use guidepost::core::{StepActivation, TourHistory};
/// use chrono::Utc;
///
/// let history = TourHistory::new();
/// let history = history.record(StepActivation {
///     from: None,
///     to: 0,
///     timestamp: Utc::now(),
/// });
/// let history = history.record(StepActivation {
///     from: Some(0),
///     to: 1,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.visited(), vec![0, 1]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TourHistory {
    activations: Vec<StepActivation>,
}

impl TourHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        TourHistory {
            activations: Vec::new(),
        }
    }

    /// Record an activation, returning a new history.
    ///
    /// The existing history is left unchanged.
    pub fn record(&self, activation: StepActivation) -> Self {
        let mut activations = self.activations.clone();
        activations.push(activation);
        TourHistory { activations }
    }

    /// The indices activated, in order.
    pub fn visited(&self) -> Vec<usize> {
        self.activations.iter().map(|a| a.to).collect()
    }

    /// All recorded activations in order.
    pub fn activations(&self) -> &[StepActivation] {
        &self.activations
    }

    /// Elapsed time from first to last activation.
    ///
    /// Returns `None` when nothing was recorded yet.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.activations.first()?, self.activations.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
