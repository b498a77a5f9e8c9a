//! Environment-gated Google tag shim for Leptos/WASM sites.
//!
//! Events are only forwarded when the page is served from a production host;
//! on localhost, private addresses, explicit ports or development builds the
//! tag is never loaded and events are at most logged to the console.

pub mod analytics;
pub mod bindings;
pub mod components;
pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod event;
pub mod events;
pub mod host;
pub mod sink;
pub mod tracker;
#[cfg(test)]
mod test_support;

pub use analytics::{
    configure, current_environment, initialize, initialize_when_loaded, page_view, should_track,
    track_event, track_record,
};
pub use components::PageViewTracker;
pub use config::AnalyticsConfig;
pub use diagnostics::{ConsoleDiagnostics, Diagnostics};
pub use environment::{classify, Environment};
pub use error::TrackError;
pub use event::{Command, ConfigParams, EventRecord, Properties};
pub use host::{BrowserHost, BuildMode, HostContext};
pub use sink::{GtagSink, Sink};
pub use tracker::Tracker;
