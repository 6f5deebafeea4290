//! Runner error types.

use thiserror::Error;

/// Errors that can occur while wiring up a tour instance.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("Step sequence already installed for this tour instance")]
    StepsAlreadyInstalled,

    #[error("Step sequence not installed. Call install(steps) before start()")]
    StepsNotInstalled,
}
