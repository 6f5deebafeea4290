//! Step descriptors: the declarative unit of a walkthrough.
//!
//! A descriptor pairs an optional target reference with a content function
//! evaluated at render time and an optional entry behavior invoked when the
//! step becomes active. Descriptors are plain values; all side effects live
//! inside the closures they carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a UI element a step highlights.
///
/// Targets are opaque to the engine; the host resolves them against its own
/// element registry. An informational step carries no target at all.
///
/// # Example
///
/// ```rust
/// use guidepost::core::TargetId;
///
/// let target = TargetId::new("cancer-study-search-box-input");
/// assert_eq!(target.as_str(), "cancer-study-search-box-input");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TargetId(String);

impl TargetId {
    /// Create a target identifier.
    pub fn new(id: impl Into<String>) -> Self {
        TargetId(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        TargetId::new(id)
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        TargetId(id)
    }
}

/// Opaque handle to a located host element.
///
/// Handles are issued by the host when a target resolves and are only
/// meaningful to the port that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementRef(u64);

impl ElementRef {
    /// Wrap a host-issued handle value.
    pub fn new(raw: u64) -> Self {
        ElementRef(raw)
    }

    /// The raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Action behind a content-embedded choice.
pub type ChoiceAction = Arc<dyn Fn() + Send + Sync>;

/// A labeled affordance embedded in step content.
///
/// The host renders the label as a control and invokes the action when the
/// user picks it. Choices let a step offer explicit endings beyond the
/// default advance control.
#[derive(Clone)]
pub struct StepChoice {
    label: String,
    action: ChoiceAction,
}

impl StepChoice {
    /// Create a choice from a label and its action.
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        StepChoice {
            label: label.into(),
            action: Arc::new(action),
        }
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the choice's action.
    pub fn invoke(&self) {
        (self.action)();
    }
}

impl fmt::Debug for StepChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepChoice")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Display content for one step, produced fresh on every render.
///
/// Content is paragraphs of text plus zero or more [`StepChoice`]s. Only the
/// text survives serialization; choice actions are runtime closures.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StepContent {
    paragraphs: Vec<String>,
    #[serde(skip)]
    choices: Vec<StepChoice>,
}

impl StepContent {
    /// Single-paragraph content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use guidepost::core::StepContent;
    ///
    /// let content = StepContent::text("Select two studies of interest.");
    /// assert_eq!(content.paragraphs_ref().len(), 1);
    /// ```
    pub fn text(body: impl Into<String>) -> Self {
        StepContent {
            paragraphs: vec![body.into()],
            choices: Vec::new(),
        }
    }

    /// Multi-paragraph content.
    pub fn paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StepContent {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
            choices: Vec::new(),
        }
    }

    /// Append a labeled choice.
    pub fn with_choice<F>(mut self, label: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.choices.push(StepChoice::new(label, action));
        self
    }

    /// The paragraphs in display order.
    pub fn paragraphs_ref(&self) -> &[String] {
        &self.paragraphs
    }

    /// The embedded choices in display order.
    pub fn choices(&self) -> &[StepChoice] {
        &self.choices
    }
}

/// Render-time content function. Evaluated on every render, never cached,
/// since content may depend on context captured at sequence construction.
pub type ContentFn = Arc<dyn Fn() -> StepContent + Send + Sync>;

/// Entry behavior invoked when a step becomes active. Receives the located
/// element, or `None` when the step has no target or the target did not
/// resolve.
pub type EnterFn = Arc<dyn Fn(Option<&ElementRef>) + Send + Sync>;

/// Declarative unit describing one point in a walkthrough.
///
/// # Example
///
/// ```rust
/// use guidepost::core::{StepContent, StepDescriptor};
///
/// let step = StepDescriptor::new(|| StepContent::text("Click the bookmark icon."))
///     .with_target("action-button-bookmark");
/// assert!(step.target().is_some());
///
/// // Entering a step with no behavior is a no-op.
/// step.enter(None);
/// ```
#[derive(Clone)]
pub struct StepDescriptor {
    target: Option<TargetId>,
    content: ContentFn,
    on_enter: Option<EnterFn>,
}

impl StepDescriptor {
    /// Create a descriptor from its content function.
    pub fn new<F>(content: F) -> Self
    where
        F: Fn() -> StepContent + Send + Sync + 'static,
    {
        StepDescriptor {
            target: None,
            content: Arc::new(content),
            on_enter: None,
        }
    }

    /// Set the target this step highlights.
    pub fn with_target(mut self, target: impl Into<TargetId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the entry behavior.
    pub fn on_enter<F>(mut self, behavior: F) -> Self
    where
        F: Fn(Option<&ElementRef>) + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(behavior));
        self
    }

    /// The target reference, if any.
    pub fn target(&self) -> Option<&TargetId> {
        self.target.as_ref()
    }

    /// Produce the display content. Runs the content function on every call.
    pub fn content(&self) -> StepContent {
        (self.content)()
    }

    /// Fire the entry behavior, if any, with the located element.
    pub fn enter(&self, element: Option<&ElementRef>) {
        if let Some(on_enter) = &self.on_enter {
            on_enter(element);
        }
    }
}

impl fmt::Debug for StepDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("target", &self.target)
            .field("has_enter", &self.on_enter.is_some())
            .finish_non_exhaustive()
    }
}
