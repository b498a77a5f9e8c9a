use crate::config::AnalyticsConfig;
use crate::diagnostics::{ConsoleDiagnostics, Diagnostics};
use crate::environment::Environment;
use crate::event::{EventRecord, Properties};
use crate::host::{BrowserHost, HostContext};
use crate::sink::GtagSink;
use crate::tracker::Tracker;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub type BrowserTracker = Tracker<BrowserHost, GtagSink, ConsoleDiagnostics>;

fn browser_tracker(config: AnalyticsConfig) -> BrowserTracker {
    Tracker::new(config, BrowserHost, GtagSink, ConsoleDiagnostics)
}

thread_local! {
    static TRACKER: RefCell<BrowserTracker> = RefCell::new(browser_tracker(AnalyticsConfig::default()));
}

fn with_tracker<R>(f: impl FnOnce(&BrowserTracker) -> R) -> R {
    TRACKER.with(|tracker| f(&tracker.borrow()))
}

/// Replace the page-wide configuration.
///
/// Only takes effect before [`initialize`]; once the tag is installed the
/// configuration is fixed for the rest of the session.
pub fn configure(config: AnalyticsConfig) {
    TRACKER.with(|tracker| {
        if tracker.borrow().is_initialized() {
            ConsoleDiagnostics.warn("configure() ignored, tracking is already initialized");
            return;
        }
        *tracker.borrow_mut() = browser_tracker(config);
    });
}

/// Install the Google tag if this page is trackable.
pub fn initialize() {
    with_tracker(|t| t.initialize());
}

/// Initialize now if the page has finished loading, otherwise on `load`.
pub fn initialize_when_loaded() {
    if BrowserHost.is_loaded() {
        initialize();
        return;
    }
    if let Some(window) = web_sys::window() {
        let closure = Closure::once(Box::new(|| {
            initialize();
        }) as Box<dyn FnOnce()>);

        let _ = window.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
        closure.forget(); // Keep the closure alive until the page loads
    }
}

pub fn page_view(url: &str, title: Option<&str>) {
    with_tracker(|t| t.page_view(url, title));
}

/// Track a custom event. Fails silently when tracking is off or the tag
/// never loaded (e.g., blocked by an adblocker).
pub fn track_event(
    action: &str,
    category: &str,
    label: Option<&str>,
    value: Option<f64>,
    extra: Option<Properties>,
) {
    with_tracker(|t| t.track(action, category, label, value, extra));
}

pub fn track_record(record: &EventRecord) {
    with_tracker(|t| t.track_event(record));
}

pub fn current_environment() -> Environment {
    with_tracker(|t| t.environment())
}

pub fn should_track() -> bool {
    with_tracker(|t| t.should_track())
}
