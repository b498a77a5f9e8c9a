use crate::config::AnalyticsConfig;
use crate::diagnostics::Diagnostics;
use crate::environment::{self, Environment};
use crate::error::TrackError;
use crate::event::{Command, ConfigParams, EventRecord, Properties};
use crate::host::HostContext;
use crate::sink::Sink;
use std::cell::Cell;

/// Gates and forwards events to a [`Sink`].
///
/// Trackability is re-evaluated against the host on every call. All
/// operations are fire-and-forget: failures go to the diagnostic channel and
/// never reach the caller.
pub struct Tracker<H, S, D> {
    config: AnalyticsConfig,
    host: H,
    sink: S,
    diagnostics: D,
    installed: Cell<bool>,
}

impl<H: HostContext, S: Sink, D: Diagnostics> Tracker<H, S, D> {
    pub fn new(config: AnalyticsConfig, host: H, sink: S, diagnostics: D) -> Self {
        Self {
            config,
            host,
            sink,
            diagnostics,
            installed: Cell::new(false),
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn environment(&self) -> Environment {
        environment::classify(&self.host, &self.config)
    }

    pub fn should_track(&self) -> bool {
        environment::should_track(&self.host)
    }

    /// Whether [`initialize`](Self::initialize) has installed the sink.
    pub fn is_initialized(&self) -> bool {
        self.installed.get()
    }

    fn debug(&self, message: impl FnOnce() -> String) {
        if self.config.debug {
            self.diagnostics.debug(&message());
        }
    }

    fn forward(&self, command: &Command) {
        if let Err(e) = self.sink.send(command) {
            self.diagnostics
                .warn(&format!("failed to send {} command: {}", command.verb(), e));
        }
    }

    /// Install the sink, then send the bootstrap and configuration commands.
    ///
    /// Does nothing outside a trackable environment. Repeated calls after a
    /// successful install are no-ops; a failed install leaves the tracker
    /// uninstalled so every emitting call stays a no-op.
    pub fn initialize(&self) {
        if !self.should_track() {
            self.debug(|| format!("tracking disabled in {} environment", self.environment()));
            return;
        }
        if self.installed.get() {
            self.debug(|| "already initialized".to_string());
            return;
        }

        if let Err(e) = self.sink.install(&self.config) {
            self.diagnostics.warn(&format!("failed to initialize: {}", e));
            return;
        }
        self.installed.set(true);

        self.forward(&Command::Js {
            timestamp_ms: self.host.now_ms(),
        });
        self.forward(&Command::Config {
            tracking_id: self.config.tracking_id.clone(),
            params: ConfigParams::from_config(&self.config),
        });
    }

    /// Record a page view. Without an explicit `title` the current document
    /// title is used.
    pub fn page_view(&self, url: &str, title: Option<&str>) {
        if !self.should_track() {
            self.debug(|| format!("page view: {} (not sent)", url));
            return;
        }
        if !self.sink.is_installed() {
            return;
        }

        let title = title
            .map(str::to_string)
            .or_else(|| self.host.document_title())
            .unwrap_or_default();
        let referrer = self.host.referrer().unwrap_or_default();
        self.forward(&Command::page_view(url, &title, &referrer));
    }

    pub fn track_event(&self, record: &EventRecord) {
        if !self.should_track() {
            self.debug(|| {
                format!(
                    "event: {} / {} {:?} (not sent)",
                    record.category(),
                    record.action(),
                    record.to_properties()
                )
            });
            return;
        }
        if !self.sink.is_installed() {
            return;
        }
        self.forward(&Command::event(record));
    }

    /// Build and send a custom event. `extra` is merged after the named
    /// fields and wins on key collisions.
    pub fn track(
        &self,
        action: &str,
        category: &str,
        label: Option<&str>,
        value: Option<f64>,
        extra: Option<Properties>,
    ) {
        match build_record(action, category, label, value, extra) {
            Ok(record) => self.track_event(&record),
            Err(e) => self.diagnostics.warn(&format!("dropped event: {}", e)),
        }
    }
}

pub(crate) fn build_record(
    action: &str,
    category: &str,
    label: Option<&str>,
    value: Option<f64>,
    extra: Option<Properties>,
) -> Result<EventRecord, TrackError> {
    let mut record = EventRecord::new(action, category)?;
    if let Some(label) = label {
        record = record.with_label(label);
    }
    if let Some(value) = value {
        record = record.with_value(value);
    }
    if let Some(extra) = extra {
        record = record.with_properties(extra);
    }
    Ok(record)
}
