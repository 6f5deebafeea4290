//! Host-facing ports.
//!
//! The engine never touches the page directly. Element lookup, attribute
//! mutation, synthetic input dispatch, click listeners, navigation, and
//! delayed callbacks all go through the traits in this module, so any host
//! exposing these primitives is compatible and tests can substitute
//! in-memory fakes.

mod dom;
mod timer;

pub use dom::{listen_once, DomPort, ListenScope, ListenerFn, ListenerId};
pub use timer::{TimerCallback, TimerPort};
