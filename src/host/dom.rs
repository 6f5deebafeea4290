//! The DOM surface consumed by the engine.
//!
//! The port is deliberately small: lookup by identifier, attribute mutation,
//! synthetic input dispatch, click listeners, and full navigation. Listener
//! handlers attached through [`listen_once`] detach themselves after the
//! first trigger, which is the discipline every advancement listener in a
//! walkthrough relies on.

use crate::core::{ElementRef, TargetId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Handle to an attached click listener, issued by the host.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a host-issued listener handle.
    pub fn new(raw: u64) -> Self {
        ListenerId(raw)
    }

    /// The raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Where a click listener is attached.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListenScope {
    /// A specific located element.
    Element(ElementRef),
    /// The whole document; fires for a click anywhere.
    Document,
}

/// Click handler stored by the host.
pub type ListenerFn = Arc<dyn Fn() + Send + Sync>;

/// Primitives the engine needs from the host page.
///
/// All operations are infallible from the engine's point of view: a lookup
/// that finds nothing returns `None`, and mutations against stale handles
/// are the host's to ignore.
pub trait DomPort: Send + Sync {
    /// Locate the element a target identifier refers to.
    fn resolve(&self, target: &TargetId) -> Option<ElementRef>;

    /// Write an attribute on a located element.
    fn set_attribute(&self, element: ElementRef, name: &str, value: &str);

    /// Dispatch a synthetic input event on a located element, so the host
    /// application reacts as if the user had typed.
    fn dispatch_input(&self, element: ElementRef);

    /// Attach a click listener and return its handle.
    fn add_click_listener(&self, scope: ListenScope, handler: ListenerFn) -> ListenerId;

    /// Detach a previously attached click listener.
    fn remove_click_listener(&self, id: ListenerId);

    /// Perform a full page navigation. In-memory tour state does not
    /// survive this; a resume point written beforehand does.
    fn navigate(&self, href: &str);
}

/// Attach a click listener that detaches itself after the first trigger.
///
/// Repeated clicks run the handler exactly once: an atomic guard covers the
/// window between the trigger and the host processing the removal, so
/// duplicate or out-of-order click delivery cannot double-fire advancement.
pub fn listen_once<F>(dom: Arc<dyn DomPort>, scope: ListenScope, handler: F) -> ListenerId
where
    F: Fn() + Send + Sync + 'static,
{
    let fired = Arc::new(AtomicBool::new(false));
    let slot: Arc<OnceLock<ListenerId>> = Arc::new(OnceLock::new());

    let id = dom.add_click_listener(scope, {
        let dom = Arc::clone(&dom);
        let fired = Arc::clone(&fired);
        let slot = Arc::clone(&slot);
        Arc::new(move || {
            if fired.swap(true, Ordering::SeqCst) {
                return;
            }
            if let Some(id) = slot.get() {
                dom.remove_click_listener(*id);
            }
            handler();
        })
    });
    let _ = slot.set(id);
    id
}
