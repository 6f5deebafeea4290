//! The tour controller: activation, locking, jumps, and termination.

use crate::core::{StepActivation, StepContent, StepSequence, TourHistory};
use crate::host::DomPort;
use crate::runner::controls::TourControls;
use crate::runner::error::TourError;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use uuid::Uuid;

struct ControllerState {
    current: usize,
    started: bool,
    locked: bool,
    pending_jump: Option<usize>,
    ended: bool,
    activating: bool,
    history: TourHistory,
}

struct Inner {
    state: Mutex<ControllerState>,
    steps: OnceLock<StepSequence>,
    dom: Arc<dyn DomPort>,
    instance: Uuid,
}

impl Inner {
    fn locked_state(&self) -> MutexGuard<'_, ControllerState> {
        // A panic inside an entry behavior must not brick the tour.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Activate `index`, fire its entry behavior, then drain any jump the
    /// behavior scheduled. Each drained jump fires its own entry behavior
    /// exactly once.
    fn activate(&self, index: usize) {
        let mut index = index;
        loop {
            let Some(steps) = self.steps.get() else {
                return;
            };
            let Some(descriptor) = steps.get(index).cloned() else {
                tracing::warn!(
                    tour = %self.instance,
                    index,
                    len = steps.len(),
                    "ignoring jump outside the step sequence"
                );
                return;
            };

            {
                let mut state = self.locked_state();
                if state.ended {
                    return;
                }
                let from = state.started.then_some(state.current);
                state.started = true;
                state.current = index;
                state.activating = true;
                state.history = state.history.record(StepActivation {
                    from,
                    to: index,
                    timestamp: Utc::now(),
                });
            }

            tracing::debug!(tour = %self.instance, index, "activating step");
            let element = descriptor.target().and_then(|t| self.dom.resolve(t));
            descriptor.enter(element.as_ref());

            let next = {
                let mut state = self.locked_state();
                state.activating = false;
                if state.ended {
                    return;
                }
                state.pending_jump.take()
            };
            match next {
                Some(target) => index = target,
                None => return,
            }
        }
    }

    fn resolve_pending(&self) {
        let target = {
            let mut state = self.locked_state();
            if state.ended || state.activating {
                return;
            }
            state.pending_jump.take()
        };
        if let Some(index) = target {
            self.activate(index);
        }
    }

    fn end(&self) {
        let mut state = self.locked_state();
        if state.ended {
            return;
        }
        state.ended = true;
        state.pending_jump = None;
        state.locked = false;
        drop(state);
        tracing::info!(tour = %self.instance, "tour ended");
    }
}

/// Drives one constructed step sequence.
///
/// Initialization is two-phase, mirroring how a host mounts a tour: create
/// the controller over the page port, hand [`TourController::controls`] to
/// the step provider, install the built sequence once, then start at the
/// resume point (or step 0).
///
/// The controller never panics on bad input from the outside world: jumps
/// and resume indices beyond the sequence degrade to a warning and the tour
/// simply does not move.
pub struct TourController {
    inner: Arc<Inner>,
}

impl TourController {
    /// Create a controller over the host page port.
    pub fn new(dom: Arc<dyn DomPort>) -> Self {
        TourController {
            inner: Arc::new(Inner {
                state: Mutex::new(ControllerState {
                    current: 0,
                    started: false,
                    locked: false,
                    pending_jump: None,
                    ended: false,
                    activating: false,
                    history: TourHistory::new(),
                }),
                steps: OnceLock::new(),
                dom,
                instance: Uuid::new_v4(),
            }),
        }
    }

    /// The capability handle step behaviors capture.
    pub fn controls(&self) -> ControllerHandle {
        ControllerHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Install the constructed step sequence. Allowed exactly once per
    /// controller instance; the branch chosen at construction is final.
    pub fn install(&self, steps: StepSequence) -> Result<(), TourError> {
        self.inner
            .steps
            .set(steps)
            .map_err(|_| TourError::StepsAlreadyInstalled)
    }

    /// Start the tour at the resume point, or at step 0 when none exists.
    pub fn start(&self, resume_from: Option<usize>) -> Result<(), TourError> {
        if self.inner.steps.get().is_none() {
            return Err(TourError::StepsNotInstalled);
        }
        let index = resume_from.unwrap_or(0);
        tracing::info!(
            tour = %self.inner.instance,
            index,
            resumed = resume_from.is_some(),
            "starting tour"
        );
        self.inner.activate(index);
        Ok(())
    }

    /// Host-driven "next" control. Suppressed while locked; advancing past
    /// the last step ends the tour.
    pub fn advance(&self) {
        let next = {
            let state = self.inner.locked_state();
            if state.ended || !state.started {
                return;
            }
            if state.locked {
                tracing::debug!(tour = %self.inner.instance, "advance suppressed while locked");
                return;
            }
            state.current + 1
        };
        let len = self.inner.steps.get().map_or(0, StepSequence::len);
        if next >= len {
            self.inner.end();
        } else {
            self.inner.activate(next);
        }
    }

    /// Re-activate the current step, firing its entry behavior again with
    /// freshly attached listeners.
    pub fn reenter(&self) {
        let current = {
            let state = self.inner.locked_state();
            if state.ended || !state.started {
                return;
            }
            state.current
        };
        self.inner.activate(current);
    }

    /// Terminate the tour. Idempotent.
    pub fn end_tour(&self) {
        self.inner.end();
    }

    /// The active step index, if the tour is running.
    pub fn current_index(&self) -> Option<usize> {
        let state = self.inner.locked_state();
        (state.started && !state.ended).then_some(state.current)
    }

    /// Whether the default advance control is currently suppressed.
    pub fn is_locked(&self) -> bool {
        self.inner.locked_state().locked
    }

    /// Whether the tour has ended.
    pub fn is_ended(&self) -> bool {
        self.inner.locked_state().ended
    }

    /// Produce the active step's content. Evaluated fresh on every call.
    pub fn active_content(&self) -> Option<StepContent> {
        let index = self.current_index()?;
        let steps = self.inner.steps.get()?;
        steps.get(index).map(|step| step.content())
    }

    /// Snapshot of the activation history so far.
    pub fn history(&self) -> TourHistory {
        self.inner.locked_state().history.clone()
    }

    /// Identifier of this tour instance, as used in its log events.
    pub fn instance(&self) -> Uuid {
        self.inner.instance
    }
}

/// Cloneable [`TourControls`] implementation backed by a controller.
///
/// Jump requests made while an entry behavior is running are drained after
/// it returns; requests made outside an activation resolve immediately.
/// Every operation is a no-op once the tour has ended, which is what keeps
/// stale listeners harmless.
#[derive(Clone)]
pub struct ControllerHandle {
    inner: Arc<Inner>,
}

impl TourControls for ControllerHandle {
    fn set_lock(&self, locked: bool) {
        let mut state = self.inner.locked_state();
        if state.ended {
            return;
        }
        if state.locked != locked {
            tracing::debug!(tour = %self.inner.instance, locked, "advance lock changed");
        }
        state.locked = locked;
    }

    fn set_goto_step(&self, target: Option<usize>) {
        {
            let mut state = self.inner.locked_state();
            if state.ended {
                return;
            }
            state.pending_jump = target;
            if target.is_none() || state.activating {
                return;
            }
        }
        self.inner.resolve_pending();
    }

    fn end_tour(&self) {
        self.inner.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ElementRef, StepContent, StepDescriptor, TargetId};
    use crate::host::{ListenScope, ListenerFn, ListenerId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct BarePage;

    impl DomPort for BarePage {
        fn resolve(&self, _target: &TargetId) -> Option<ElementRef> {
            None
        }

        fn set_attribute(&self, _element: ElementRef, _name: &str, _value: &str) {}

        fn dispatch_input(&self, _element: ElementRef) {}

        fn add_click_listener(&self, _scope: ListenScope, _handler: ListenerFn) -> ListenerId {
            ListenerId::new(0)
        }

        fn remove_click_listener(&self, _id: ListenerId) {}

        fn navigate(&self, _href: &str) {}
    }

    fn plain_step(label: &'static str) -> StepDescriptor {
        StepDescriptor::new(move || StepContent::text(label))
    }

    fn plain_sequence(len: usize) -> StepSequence {
        StepSequence::new((0..len).map(|_| plain_step("step")).collect())
    }

    fn controller() -> TourController {
        TourController::new(Arc::new(BarePage))
    }

    #[test]
    fn install_twice_is_rejected() {
        let controller = controller();
        controller.install(plain_sequence(2)).unwrap();

        let result = controller.install(plain_sequence(2));
        assert!(matches!(result, Err(TourError::StepsAlreadyInstalled)));
    }

    #[test]
    fn start_without_steps_is_rejected() {
        let controller = controller();
        assert!(matches!(
            controller.start(None),
            Err(TourError::StepsNotInstalled)
        ));
    }

    #[test]
    fn start_activates_step_zero() {
        let controller = controller();
        controller.install(plain_sequence(3)).unwrap();
        controller.start(None).unwrap();

        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(controller.history().visited(), vec![0]);
    }

    #[test]
    fn start_resumes_at_persisted_index() {
        let controller = controller();
        controller.install(plain_sequence(5)).unwrap();
        controller.start(Some(3)).unwrap();

        assert_eq!(controller.current_index(), Some(3));
        assert_eq!(controller.history().visited(), vec![3]);
    }

    #[test]
    fn out_of_range_start_does_not_activate() {
        let controller = controller();
        controller.install(plain_sequence(2)).unwrap();
        controller.start(Some(42)).unwrap();

        assert_eq!(controller.current_index(), None);
        assert!(!controller.is_ended());
    }

    #[test]
    fn advance_walks_forward_and_ends_past_the_last_step() {
        let controller = controller();
        controller.install(plain_sequence(2)).unwrap();
        controller.start(None).unwrap();

        controller.advance();
        assert_eq!(controller.current_index(), Some(1));

        controller.advance();
        assert!(controller.is_ended());
        assert_eq!(controller.current_index(), None);
    }

    #[test]
    fn advance_is_suppressed_while_locked() {
        let controller = controller();
        let handle = controller.controls();
        let steps = StepSequence::new(vec![
            StepDescriptor::new(|| StepContent::text("gated")).on_enter({
                let handle = handle.clone();
                move |_| handle.set_lock(true)
            }),
            plain_step("after"),
        ]);
        controller.install(steps).unwrap();
        controller.start(None).unwrap();

        controller.advance();
        assert_eq!(controller.current_index(), Some(0));

        handle.set_lock(false);
        controller.advance();
        assert_eq!(controller.current_index(), Some(1));
    }

    #[test]
    fn jump_requested_during_entry_drains_after_it_returns() {
        let controller = controller();
        let handle = controller.controls();
        let middle_entries = Arc::new(AtomicUsize::new(0));

        let counted = Arc::clone(&middle_entries);
        let steps = StepSequence::new(vec![
            StepDescriptor::new(|| StepContent::text("first")).on_enter({
                let handle = handle.clone();
                move |_| handle.set_goto_step(Some(2))
            }),
            StepDescriptor::new(|| StepContent::text("skipped")).on_enter(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
            }),
            plain_step("landing"),
        ]);
        controller.install(steps).unwrap();
        controller.start(None).unwrap();

        assert_eq!(controller.current_index(), Some(2));
        assert_eq!(controller.history().visited(), vec![0, 2]);
        assert_eq!(middle_entries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn jump_requested_outside_entry_resolves_immediately() {
        let controller = controller();
        let handle = controller.controls();
        controller.install(plain_sequence(4)).unwrap();
        controller.start(None).unwrap();

        handle.set_goto_step(Some(3));
        assert_eq!(controller.current_index(), Some(3));
    }

    #[test]
    fn clearing_a_pending_jump_prevents_resolution() {
        let controller = controller();
        let handle = controller.controls();
        let steps = StepSequence::new(vec![
            StepDescriptor::new(|| StepContent::text("first")).on_enter({
                let handle = handle.clone();
                move |_| {
                    handle.set_goto_step(Some(2));
                    handle.set_goto_step(None);
                }
            }),
            plain_step("second"),
            plain_step("third"),
        ]);
        controller.install(steps).unwrap();
        controller.start(None).unwrap();

        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn out_of_range_jump_is_ignored() {
        let controller = controller();
        let handle = controller.controls();
        controller.install(plain_sequence(2)).unwrap();
        controller.start(None).unwrap();

        handle.set_goto_step(Some(17));
        assert_eq!(controller.current_index(), Some(0));
        assert!(!controller.is_ended());
    }

    #[test]
    fn end_tour_is_idempotent() {
        let controller = controller();
        controller.install(plain_sequence(2)).unwrap();
        controller.start(None).unwrap();

        controller.end_tour();
        controller.end_tour();

        assert!(controller.is_ended());
        assert!(!controller.is_locked());
    }

    #[test]
    fn capabilities_are_noops_after_end() {
        let controller = controller();
        let handle = controller.controls();
        controller.install(plain_sequence(3)).unwrap();
        controller.start(None).unwrap();
        controller.end_tour();

        handle.set_lock(true);
        handle.set_goto_step(Some(2));
        controller.advance();

        assert!(!controller.is_locked());
        assert_eq!(controller.current_index(), None);
        assert_eq!(controller.history().visited(), vec![0]);
    }

    #[test]
    fn ending_during_entry_stops_the_drain() {
        let controller = controller();
        let handle = controller.controls();
        let steps = StepSequence::new(vec![
            StepDescriptor::new(|| StepContent::text("first")).on_enter({
                let handle = handle.clone();
                move |_| {
                    handle.set_goto_step(Some(1));
                    handle.end_tour();
                }
            }),
            plain_step("never"),
        ]);
        controller.install(steps).unwrap();
        controller.start(None).unwrap();

        assert!(controller.is_ended());
        assert_eq!(controller.history().visited(), vec![0]);
    }

    #[test]
    fn reenter_fires_the_entry_behavior_again() {
        let controller = controller();
        let entries = Arc::new(AtomicUsize::new(0));

        let counted = Arc::clone(&entries);
        let steps = StepSequence::new(vec![StepDescriptor::new(|| StepContent::text("again"))
            .on_enter(move |_| {
                counted.fetch_add(1, Ordering::SeqCst);
            })]);
        controller.install(steps).unwrap();
        controller.start(None).unwrap();
        controller.reenter();

        assert_eq!(entries.load(Ordering::SeqCst), 2);
        assert_eq!(controller.history().visited(), vec![0, 0]);
    }

    #[test]
    fn active_content_is_evaluated_on_every_call() {
        let controller = controller();
        let evaluations = Arc::new(AtomicUsize::new(0));

        let counted = Arc::clone(&evaluations);
        let steps = StepSequence::new(vec![StepDescriptor::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            StepContent::text("live")
        })]);
        controller.install(steps).unwrap();
        controller.start(None).unwrap();

        controller.active_content();
        controller.active_content();

        assert_eq!(evaluations.load(Ordering::SeqCst), 2);
    }
}
