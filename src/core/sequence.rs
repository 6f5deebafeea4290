//! The flat ordered step sequence.
//!
//! A tour is a single linear sequence at any instant. Branching happens once
//! at construction, when a continuation is concatenated onto the common
//! prefix; step indices are stable only within one constructed sequence.

use super::step::StepDescriptor;

/// Ordered sequence of step descriptors built once per tour instance.
///
/// # Example
///
/// ```rust
/// use guidepost::core::{StepContent, StepDescriptor, StepSequence};
///
/// let sequence = StepSequence::new(vec![
///     StepDescriptor::new(|| StepContent::text("first")),
///     StepDescriptor::new(|| StepContent::text("second")),
/// ]);
///
/// assert_eq!(sequence.len(), 2);
/// assert!(sequence.get(2).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StepSequence {
    steps: Vec<StepDescriptor>,
}

impl StepSequence {
    /// Wrap an already-ordered list of descriptors.
    pub fn new(steps: Vec<StepDescriptor>) -> Self {
        StepSequence { steps }
    }

    /// Number of steps in the sequence.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence holds no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The descriptor at an absolute index.
    pub fn get(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    /// Iterate the descriptors in order.
    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter()
    }
}

impl From<Vec<StepDescriptor>> for StepSequence {
    fn from(steps: Vec<StepDescriptor>) -> Self {
        StepSequence::new(steps)
    }
}
