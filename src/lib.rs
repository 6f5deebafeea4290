//! Guidepost: a resumable, conditionally-gated walkthrough engine
//!
//! Guidepost drives a user through a sequence of in-product actions by
//! describing each step declaratively and deciding which step is active,
//! when advancement is permitted, and how the sequence forks on runtime
//! context. The page itself, the overlay renderer, and persistent storage
//! stay outside the crate and are reached through injected ports.
//!
//! # Core Concepts
//!
//! - **Step descriptors**: declarative units pairing a target reference with
//!   lazily produced content and an optional entry behavior
//! - **Gates**: pure numeric predicates that decide whether a step may be
//!   advanced past
//! - **Controller**: holds the current index, lock flag, and pending jump,
//!   and resolves requested jumps exactly once
//! - **Resume points**: a single persisted index that survives full page
//!   transitions
//!
//! # Example
//!
//! ```rust
//! use guidepost::core::{Gate, StepContent, StepDescriptor, StepSequence};
//!
//! // Advancement past the multi-select step opens only above the threshold.
//! let gate = Gate::more_than(1);
//! assert!(!gate.check(1));
//! assert!(gate.check(2));
//!
//! let step = StepDescriptor::new(|| StepContent::text("Select two studies of interest."))
//!     .with_target("cancer-study-list-container");
//! let sequence = StepSequence::new(vec![step]);
//! assert_eq!(sequence.len(), 1);
//! ```

pub mod core;
pub mod host;
pub mod resume;
pub mod runner;
pub mod tour;

// Re-export commonly used types
pub use crate::core::{Gate, StepContent, StepDescriptor, StepSequence, TargetId};
pub use crate::runner::{TourController, TourControls};
