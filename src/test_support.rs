//! In-memory stand-ins for the browser, the Google tag and the console.

use crate::config::AnalyticsConfig;
use crate::diagnostics::Diagnostics;
use crate::error::TrackError;
use crate::event::Command;
use crate::host::{BuildMode, HostContext};
use crate::sink::Sink;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct FakeHost {
    available: bool,
    hostname: RefCell<Option<String>>,
    port: Option<String>,
    build_mode: BuildMode,
    title: Option<String>,
    referrer: Option<String>,
    loaded: bool,
    now_ms: f64,
}

impl FakeHost {
    /// A production build served from `hostname` on the default port.
    pub fn production(hostname: &str) -> Self {
        Self {
            available: true,
            hostname: RefCell::new(Some(hostname.to_string())),
            port: Some(String::new()),
            build_mode: BuildMode::Production,
            title: Some("Calculator".to_string()),
            referrer: Some(String::new()),
            loaded: true,
            now_ms: 1_700_000_000_000.0,
        }
    }

    /// No window at all, like server-side rendering.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            hostname: RefCell::new(None),
            port: None,
            build_mode: BuildMode::Production,
            title: None,
            referrer: None,
            loaded: false,
            now_ms: 0.0,
        }
    }

    pub fn with_port(mut self, port: &str) -> Self {
        self.port = Some(port.to_string());
        self
    }

    pub fn with_build_mode(mut self, mode: BuildMode) -> Self {
        self.build_mode = mode;
        self
    }

    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }

    pub fn with_referrer(mut self, referrer: &str) -> Self {
        self.referrer = Some(referrer.to_string());
        self
    }

    pub fn set_hostname(&self, hostname: &str) {
        *self.hostname.borrow_mut() = Some(hostname.to_string());
    }
}

impl HostContext for FakeHost {
    fn is_available(&self) -> bool {
        self.available
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.borrow().clone()
    }

    fn port(&self) -> Option<String> {
        self.port.clone()
    }

    fn build_mode(&self) -> BuildMode {
        self.build_mode
    }

    fn document_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn referrer(&self) -> Option<String> {
        self.referrer.clone()
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// Records installs and commands. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    installs: Rc<Cell<usize>>,
    commands: Rc<RefCell<Vec<Command>>>,
    fail_install: bool,
    fail_send: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_install() -> Self {
        Self {
            fail_install: true,
            ..Self::default()
        }
    }

    pub fn failing_send() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    pub fn installs(&self) -> usize {
        self.installs.get()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }

    pub fn events(&self) -> Vec<Command> {
        self.commands()
            .into_iter()
            .filter(|c| matches!(c, Command::Event { .. }))
            .collect()
    }
}

impl Sink for RecordingSink {
    fn install(&self, _config: &AnalyticsConfig) -> Result<(), TrackError> {
        if self.fail_install {
            return Err(TrackError::Js("script injection blocked".to_string()));
        }
        self.installs.set(self.installs.get() + 1);
        Ok(())
    }

    fn is_installed(&self) -> bool {
        self.installs.get() > 0
    }

    fn send(&self, command: &Command) -> Result<(), TrackError> {
        if self.fail_send {
            return Err(TrackError::Js("gtag threw".to_string()));
        }
        self.commands.borrow_mut().push(command.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    debug: Rc<RefCell<Vec<String>>>,
    warn: Rc<RefCell<Vec<String>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug_messages(&self) -> Vec<String> {
        self.debug.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warn.borrow().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn debug(&self, message: &str) {
        self.debug.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warn.borrow_mut().push(message.to_string());
    }
}
