use web_sys::window;

/// How the bundle was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// The mode baked in at compile time.
    ///
    /// `SITE_ANALYTICS_BUILD_MODE=development|production` overrides the
    /// default, which follows `debug_assertions`.
    pub fn current() -> Self {
        match option_env!("SITE_ANALYTICS_BUILD_MODE") {
            Some(mode) => Self::parse(mode),
            None if cfg!(debug_assertions) => BuildMode::Development,
            None => BuildMode::Production,
        }
    }

    /// Anything other than `production`/`prod` counts as development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => BuildMode::Production,
            _ => BuildMode::Development,
        }
    }
}

/// Read-only view of the ambient page context.
///
/// Every accessor degrades to `None`/`false` when the information is
/// unavailable; none of them may panic.
pub trait HostContext {
    /// Whether a browser context exists at all (false during SSR or in tests
    /// without a window).
    fn is_available(&self) -> bool;
    fn hostname(&self) -> Option<String>;
    /// Explicit port from the page URL. Empty when the default port is used.
    fn port(&self) -> Option<String>;
    fn build_mode(&self) -> BuildMode;
    fn document_title(&self) -> Option<String>;
    fn referrer(&self) -> Option<String>;
    /// `document.readyState == "complete"`
    fn is_loaded(&self) -> bool;
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> f64;
}

/// Host context backed by `web_sys::window()`. Re-read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

impl HostContext for BrowserHost {
    fn is_available(&self) -> bool {
        window().is_some()
    }

    fn hostname(&self) -> Option<String> {
        window()?.location().hostname().ok()
    }

    fn port(&self) -> Option<String> {
        window()?.location().port().ok()
    }

    fn build_mode(&self) -> BuildMode {
        BuildMode::current()
    }

    fn document_title(&self) -> Option<String> {
        Some(window()?.document()?.title())
    }

    fn referrer(&self) -> Option<String> {
        Some(window()?.document()?.referrer())
    }

    fn is_loaded(&self) -> bool {
        window()
            .and_then(|w| w.document())
            .map(|d| d.ready_state() == "complete")
            .unwrap_or(false)
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mode_parse() {
        assert_eq!(BuildMode::parse("production"), BuildMode::Production);
        assert_eq!(BuildMode::parse(" PROD "), BuildMode::Production);
        assert_eq!(BuildMode::parse("development"), BuildMode::Development);
        assert_eq!(BuildMode::parse("staging"), BuildMode::Development);
        assert_eq!(BuildMode::parse(""), BuildMode::Development);
    }
}
