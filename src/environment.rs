//! Environment classification and the trackability gate.
//!
//! Everything here is a pure function of the [`HostContext`] at call time.
//! Nothing is cached, so a host whose context changes between calls is
//! re-classified on the next query.

use crate::config::AnalyticsConfig;
use crate::host::{BuildMode, HostContext};
use std::fmt;

const LOOPBACK_HOSTS: [&str; 5] = ["localhost", "127.0.0.1", "::1", "[::1]", "0.0.0.0"];
const LOCAL_MARKER: &str = "local";
const PRIVATE_PREFIXES: [&str; 2] = ["192.168.", "10."];

/// Where the page is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    /// Served from the known hosting platform (matched by marker).
    HostedPlatform,
    /// Production, but on some other domain.
    CustomDomain,
    /// No host context at all.
    Unknown,
}

impl Environment {
    pub fn label(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::HostedPlatform => "hosted",
            Environment::CustomDomain => "custom-domain",
            Environment::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_loopback(hostname: &str) -> bool {
    LOOPBACK_HOSTS.contains(&hostname)
}

fn is_private_network(hostname: &str) -> bool {
    PRIVATE_PREFIXES
        .iter()
        .any(|prefix| hostname.starts_with(prefix))
}

/// True if any development signal is present.
///
/// The checks are independent reads OR-ed together:
/// - non-production build mode
/// - loopback hostname or IP
/// - hostname containing `local`
/// - an explicit port
/// - a `192.168.` or `10.` private address
pub fn is_development_environment(host: &impl HostContext) -> bool {
    let hostname = host.hostname().unwrap_or_default();
    let port = host.port().unwrap_or_default();

    let dev_build = host.build_mode() == BuildMode::Development;
    let loopback = is_loopback(&hostname);
    let local = hostname.contains(LOCAL_MARKER);
    let has_port = !port.is_empty();
    let private = is_private_network(&hostname);

    dev_build || loopback || local || has_port || private
}

pub fn is_known_hosted_platform(host: &impl HostContext, config: &AnalyticsConfig) -> bool {
    let on_platform = match host.hostname() {
        Some(hostname) => {
            !config.platform_marker.is_empty() && hostname.contains(&config.platform_marker)
        }
        None => false,
    };
    on_platform && !is_development_environment(host)
}

/// A real deployment outside the known platform.
pub fn is_custom_deployment(host: &impl HostContext, config: &AnalyticsConfig) -> bool {
    host.is_available()
        && !is_development_environment(host)
        && !is_known_hosted_platform(host, config)
}

/// Outbound tracking is allowed only outside development and only when a
/// browser context exists.
pub fn should_track(host: &impl HostContext) -> bool {
    !is_development_environment(host) && host.is_available()
}

/// Development wins over everything else, then the hosted platform, then
/// custom deployments.
pub fn classify(host: &impl HostContext, config: &AnalyticsConfig) -> Environment {
    if is_development_environment(host) {
        Environment::Development
    } else if is_known_hosted_platform(host, config) {
        Environment::HostedPlatform
    } else if is_custom_deployment(host, config) {
        Environment::CustomDomain
    } else {
        Environment::Unknown
    }
}
