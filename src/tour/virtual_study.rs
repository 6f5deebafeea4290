//! The virtual-study walkthrough.
//!
//! A guided path from searching for studies to sharing or saving the
//! resulting virtual study. The prefix is common to every user; after the
//! bookmark step the sequence forks once on login state. Branching is
//! structural: exactly one continuation is concatenated onto the prefix at
//! construction time, never re-evaluated per step.

use crate::core::{ElementRef, Gate, StepContent, StepDescriptor, StepSequence, TargetId};
use crate::host::{listen_once, DomPort, ListenScope, TimerPort};
use crate::runner::TourControls;
use crate::tour::context::TourContext;
use crate::tour::targets;
use std::sync::Arc;
use std::time::Duration;

/// Fixed identifier the resume point is persisted under.
pub const VIRTUAL_STUDY_TOUR_ID: &str = "virtual-study-tour";

/// Steps shared by every user before the sequence forks.
pub const PREFIX_LEN: usize = 7;

/// Index the tour resumes at after the page transition into the study
/// summary.
const STUDY_SUMMARY_RESUME_INDEX: usize = 3;

/// First step of either continuation.
const SUMMARY_PANEL_INDEX: usize = PREFIX_LEN;

/// The share/save confirmation step inside either continuation.
const CONFIRMATION_INDEX: usize = PREFIX_LEN + 1;

/// Index the tour resumes at on the homepage after "Go to find it.".
pub const HOMEPAGE_RESUME_INDEX: usize = PREFIX_LEN + 2;

/// Delay between a gating click and the scheduled jump, letting the host
/// UI settle first.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Which continuation is appended after the common prefix.
///
/// Chosen once at sequence construction; a login state change mid-tour
/// does not re-branch the running instance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Continuation {
    NotLoggedIn,
    LoggedIn,
}

impl Continuation {
    /// Resolve the branch for a context.
    pub fn for_context(context: &TourContext) -> Self {
        if context.is_logged_in {
            Continuation::LoggedIn
        } else {
            Continuation::NotLoggedIn
        }
    }
}

/// Build the full ordered sequence for one tour instance.
///
/// Pure with respect to the context: construction performs no side
/// effects; everything observable happens inside the returned descriptors'
/// closures.
pub fn build_steps(context: &TourContext) -> StepSequence {
    let mut steps = prefix_steps(context);
    steps.extend(match Continuation::for_context(context) {
        Continuation::NotLoggedIn => not_logged_in_steps(context),
        Continuation::LoggedIn => logged_in_steps(context),
    });
    StepSequence::new(steps)
}

fn prefix_steps(context: &TourContext) -> Vec<StepDescriptor> {
    // Step 0: find studies through the search box; pre-fill the example
    // query so the user sees live results immediately.
    let dom = Arc::clone(&context.dom);
    let search = StepDescriptor::new(|| {
        StepContent::paragraphs([
            "Use the search box to find the studies of interest.",
            "For example, type in 'glioma'.",
        ])
    })
    .with_target(targets::STUDY_SEARCH_BOX)
    .on_enter(move |element| {
        let Some(element) = element else { return };
        dom.set_attribute(*element, "value", "glioma");
        dom.dispatch_input(*element);
    });

    // Step 1: the tour continues only once more than one study is selected.
    let multi_select = gated_step(
        context,
        targets::STUDY_LIST,
        "Select two studies of interest.",
        Gate::more_than(1),
    );

    // Step 2: clicking "Explore Selected Studies" loads the study summary
    // page, which destroys in-memory tour state. Persist the resume point
    // first and hold the lock so the click itself is what advances.
    let controls = Arc::clone(&context.controls);
    let resume = context.resume.clone();
    let explore = StepDescriptor::new(|| StepContent::text("Click \"Explore Selected Studies\"."))
        .with_target(targets::EXPLORE_BUTTON)
        .on_enter(move |_| {
            resume.save_or_warn(STUDY_SUMMARY_RESUME_INDEX);
            controls.set_lock(true);
        });

    // Step 3: expand the study description.
    let description =
        StepDescriptor::new(|| StepContent::text("Click on the \"+\" icon to see the list of studies."))
            .with_target(targets::SHOW_MORE_DESCRIPTION);

    // Step 4: sample selection in the mutated genes table.
    let table = gated_step(
        context,
        targets::MUTATED_GENES_TABLE,
        "In the Mutated Genes table, click the check box in the \"#\" column to select samples \
         with one or more mutations, then click the \"Select Samples\" button at the bottom of \
         the table.",
        Gate::more_than(0),
    );

    // Step 5: no target; explains that the remainder depends on login state.
    let ready = StepDescriptor::new(|| {
        StepContent::paragraphs([
            "We are now ready to create our virtual study. Let's create a virtual study and \
             share/save it.",
            "What you see will differ slightly depending on if you are logged in or not.",
        ])
    });

    // Step 6: the bookmark click is the only way forward.
    let controls = Arc::clone(&context.controls);
    let dom = Arc::clone(&context.dom);
    let timer = Arc::clone(&context.timer);
    let bookmark = StepDescriptor::new(|| {
        StepContent::text("Click the bookmark icon to create and share your virtual study.")
    })
    .with_target(targets::BOOKMARK_ACTION)
    .on_enter(move |element| {
        let Some(element) = element else { return };
        controls.set_lock(true);
        jump_after_click(&dom, &timer, &controls, *element, SUMMARY_PANEL_INDEX);
    });

    vec![
        search,
        multi_select,
        explore,
        description,
        table,
        ready,
        bookmark,
    ]
}

fn not_logged_in_steps(context: &TourContext) -> Vec<StepDescriptor> {
    // Step 7: the summary panel, gated on the share button.
    let share = panel_step(context, targets::SHARE_BUTTON, "Share");

    // Step 8: terminal; a click on the panel ends the walkthrough.
    let controls = Arc::clone(&context.controls);
    let dom = Arc::clone(&context.dom);
    let share_link = StepDescriptor::new(|| {
        StepContent::text(
            "Click on the link to open your virtual study, or click \"Copy\" to copy the URL \
             to your clipboard.",
        )
    })
    .with_target(targets::SUMMARY_PANEL)
    .on_enter(move |element| {
        controls.set_goto_step(None);
        controls.set_lock(false);
        let Some(element) = element else { return };
        let controls = Arc::clone(&controls);
        listen_once(Arc::clone(&dom), ListenScope::Element(*element), move || {
            controls.end_tour();
        });
    });

    vec![share, share_link]
}

fn logged_in_steps(context: &TourContext) -> Vec<StepDescriptor> {
    // Step 7: same panel, gated on the save button instead.
    let save = panel_step(context, targets::SAVE_BUTTON, "Save");

    // Step 8: two explicit endings. "Go to find it." persists the homepage
    // resume point and navigates; a plain click on the panel just ends the
    // walkthrough.
    let controls = Arc::clone(&context.controls);
    let dom = Arc::clone(&context.dom);
    let content_controls = Arc::clone(&context.controls);
    let content_dom = Arc::clone(&context.dom);
    let resume = context.resume.clone();
    let confirmation = StepDescriptor::new(move || {
        let finish = Arc::clone(&content_controls);
        let navigate = Arc::clone(&content_dom);
        let resume = resume.clone();
        StepContent::paragraphs([
            "Click on the link to open your virtual study, or click \"Copy\" to copy the URL \
             to your clipboard.",
            "When you save a study, it is added to the homepage, at the top of the study list \
             under \"My Virtual Studies\".",
            "Do you want to find it?",
        ])
        .with_choice("Finish guidance.", move || finish.end_tour())
        .with_choice("Go to find it.", move || {
            resume.save_or_warn(HOMEPAGE_RESUME_INDEX);
            navigate.navigate("/");
        })
    })
    .with_target(targets::SUMMARY_PANEL)
    .on_enter(move |element| {
        controls.set_lock(true);
        let Some(element) = element else { return };
        let controls = Arc::clone(&controls);
        listen_once(Arc::clone(&dom), ListenScope::Element(*element), move || {
            controls.set_lock(false);
            controls.set_goto_step(None);
            controls.end_tour();
        });
    });

    // Step 9: on the homepage after the resume; any click ends the
    // walkthrough.
    let controls = Arc::clone(&context.controls);
    let dom = Arc::clone(&context.dom);
    let homepage = StepDescriptor::new(|| {
        StepContent::text(
            "Click \"Query\" brings you to the query selector with your new virtual study \
             pre-selected.",
        )
    })
    .with_target(targets::STUDY_LIST)
    .on_enter(move |_| {
        controls.set_lock(false);
        controls.set_goto_step(None);
        let controls = Arc::clone(&controls);
        listen_once(Arc::clone(&dom), ListenScope::Document, move || {
            controls.end_tour();
        });
    });

    vec![save, confirmation, homepage]
}

/// A step whose lock opens only when `gate` passes for the selection count
/// captured in the context.
fn gated_step(
    context: &TourContext,
    target: &'static str,
    body: &'static str,
    gate: Gate,
) -> StepDescriptor {
    let controls = Arc::clone(&context.controls);
    let count = context.studies_selected;
    StepDescriptor::new(move || StepContent::text(body))
        .with_target(target)
        .on_enter(move |_| {
            controls.set_lock(true);
            if gate.check(count) {
                controls.set_lock(false);
            }
        })
}

/// The summary-panel step gating on a named action button. Entry clears any
/// jump left pending from the bookmark step, then waits for the button
/// click before scheduling the move to the confirmation step. A missing
/// button leaves the step inert.
fn panel_step(context: &TourContext, button: &'static str, action: &'static str) -> StepDescriptor {
    let controls = Arc::clone(&context.controls);
    let dom = Arc::clone(&context.dom);
    let timer = Arc::clone(&context.timer);
    StepDescriptor::new(move || summary_panel_content(action))
        .with_target(targets::SUMMARY_PANEL)
        .on_enter(move |_| {
            controls.set_goto_step(None);
            let Some(button) = dom.resolve(&TargetId::new(button)) else {
                return;
            };
            jump_after_click(&dom, &timer, &controls, button, CONFIRMATION_INDEX);
        })
}

fn summary_panel_content(action: &str) -> StepContent {
    StepContent::paragraphs([
        "1. Enter a name for your virtual study (optional).".to_string(),
        "2. Text box pre-filled with a description of the studies contributing samples and \
         filters applied to the samples. You can edit this text."
            .to_string(),
        "3. Check the list of studies contributing to samples with links to the study summary \
         for each."
            .to_string(),
        format!("Click on the {action} button for the next step."),
    ])
}

/// Attach a one-shot click listener on `element` that schedules a jump to
/// `target_index` after the settle delay.
fn jump_after_click(
    dom: &Arc<dyn DomPort>,
    timer: &Arc<dyn TimerPort>,
    controls: &Arc<dyn TourControls>,
    element: ElementRef,
    target_index: usize,
) {
    let timer = Arc::clone(timer);
    let controls = Arc::clone(controls);
    listen_once(Arc::clone(dom), ListenScope::Element(element), move || {
        let controls = Arc::clone(&controls);
        timer.schedule(
            SETTLE_DELAY,
            Box::new(move || {
                controls.set_goto_step(Some(target_index));
            }),
        );
    });
}
