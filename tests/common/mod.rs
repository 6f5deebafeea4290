//! Shared fake ports for integration tests.
#![allow(dead_code)]

use guidepost::core::{ElementRef, TargetId};
use guidepost::host::{DomPort, ListenScope, ListenerFn, ListenerId, TimerCallback, TimerPort};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Route engine logs through the test harness when RUST_LOG is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory page surface. Targets resolve only once registered, so tests
/// control which elements exist; clicks fire the attached listeners the way
/// a browser event queue would, against a snapshot taken before handlers
/// run.
#[derive(Default)]
pub struct FakePage {
    elements: Mutex<HashMap<String, ElementRef>>,
    listeners: Mutex<HashMap<u64, (ListenScope, ListenerFn)>>,
    attributes: Mutex<Vec<(ElementRef, String, String)>>,
    inputs: Mutex<Vec<ElementRef>>,
    navigations: Mutex<Vec<String>>,
    next_element: AtomicU64,
    next_listener: AtomicU64,
}

impl FakePage {
    pub fn new() -> Self {
        FakePage::default()
    }

    /// Make a target resolvable, returning its element handle.
    pub fn register(&self, target: &str) -> ElementRef {
        let mut elements = self.elements.lock().unwrap();
        *elements.entry(target.to_string()).or_insert_with(|| {
            ElementRef::new(self.next_element.fetch_add(1, Ordering::SeqCst))
        })
    }

    /// The handle a registered target resolves to.
    pub fn element(&self, target: &str) -> Option<ElementRef> {
        self.elements.lock().unwrap().get(target).copied()
    }

    /// Simulate a user click on a registered target's element.
    pub fn click(&self, target: &str) {
        let element = self.element(target).expect("target registered");
        self.fire(ListenScope::Element(element));
    }

    /// Simulate a click with no element-scoped listener attached, reaching
    /// only document-level listeners.
    pub fn click_anywhere(&self) {
        self.fire(ListenScope::Document);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn attributes(&self) -> Vec<(ElementRef, String, String)> {
        self.attributes.lock().unwrap().clone()
    }

    pub fn inputs(&self) -> Vec<ElementRef> {
        self.inputs.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    fn fire(&self, scope: ListenScope) {
        let handlers: Vec<ListenerFn> = self
            .listeners
            .lock()
            .unwrap()
            .values()
            .filter(|(s, _)| *s == scope)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }
}

impl DomPort for FakePage {
    fn resolve(&self, target: &TargetId) -> Option<ElementRef> {
        self.elements.lock().unwrap().get(target.as_str()).copied()
    }

    fn set_attribute(&self, element: ElementRef, name: &str, value: &str) {
        self.attributes
            .lock()
            .unwrap()
            .push((element, name.to_string(), value.to_string()));
    }

    fn dispatch_input(&self, element: ElementRef) {
        self.inputs.lock().unwrap().push(element);
    }

    fn add_click_listener(&self, scope: ListenScope, handler: ListenerFn) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().insert(id, (scope, handler));
        ListenerId::new(id)
    }

    fn remove_click_listener(&self, id: ListenerId) {
        self.listeners.lock().unwrap().remove(&id.raw());
    }

    fn navigate(&self, href: &str) {
        self.navigations.lock().unwrap().push(href.to_string());
    }
}

/// Timer that queues callbacks until the test drains them, standing in for
/// the host event loop's delayed execution.
#[derive(Default)]
pub struct FakeTimer {
    queue: Mutex<Vec<TimerCallback>>,
}

impl FakeTimer {
    pub fn new() -> Self {
        FakeTimer::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    /// Run every queued callback in scheduling order.
    pub fn fire_all(&self) {
        let pending: Vec<TimerCallback> = self.queue.lock().unwrap().drain(..).collect();
        for callback in pending {
            callback();
        }
    }
}

impl TimerPort for FakeTimer {
    fn schedule(&self, _delay: std::time::Duration, callback: TimerCallback) {
        self.queue.lock().unwrap().push(callback);
    }
}
