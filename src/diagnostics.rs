/// Best-effort local log. Nothing written here is delivered anywhere.
pub trait Diagnostics {
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Writes to the browser console, prefixed so the messages are easy to filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn debug(&self, message: &str) {
        web_sys::console::log_1(&format!("Analytics: {}", message).into());
    }

    fn warn(&self, message: &str) {
        web_sys::console::warn_1(&format!("Analytics: {}", message).into());
    }
}
