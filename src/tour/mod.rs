//! The virtual-study walkthrough definition.
//!
//! Everything specific to the guided path from study search to a shared or
//! saved virtual study lives here: the runtime context captured at
//! construction, the target identifiers of the host UI, and the step
//! provider that builds one flat sequence per tour instance.

mod context;
pub mod targets;
mod virtual_study;

pub use context::TourContext;
pub use virtual_study::{
    build_steps, Continuation, HOMEPAGE_RESUME_INDEX, PREFIX_LEN, VIRTUAL_STUDY_TOUR_ID,
};
