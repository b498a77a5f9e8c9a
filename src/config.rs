use crate::error::TrackError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder used when no measurement id was provided at build time.
pub const PLACEHOLDER_TRACKING_ID: &str = "G-XXXXXXXXXX";

const DEFAULT_SCRIPT_BASE_URL: &str = "https://www.googletagmanager.com/gtag/js";
const DEFAULT_PLATFORM_MARKER: &str = "vercel.app";

/// Tracking configuration. Supplied once when the tracker is built and never
/// renegotiated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_tracking_id")]
    pub tracking_id: String,
    /// Substring identifying the known hosting platform's hostnames.
    #[serde(default = "default_platform_marker")]
    pub platform_marker: String,
    #[serde(default = "default_script_base_url")]
    pub script_base_url: String,
    /// Log would-be events to the console when tracking is suppressed.
    #[serde(default = "default_debug")]
    pub debug: bool,
    /// Custom dimension slot -> semantic parameter name.
    #[serde(default = "default_custom_map")]
    pub custom_map: BTreeMap<String, String>,
}

fn default_tracking_id() -> String {
    option_env!("SITE_ANALYTICS_TRACKING_ID")
        .unwrap_or(PLACEHOLDER_TRACKING_ID)
        .to_string()
}

fn default_platform_marker() -> String {
    DEFAULT_PLATFORM_MARKER.to_string()
}

fn default_script_base_url() -> String {
    DEFAULT_SCRIPT_BASE_URL.to_string()
}

fn default_debug() -> bool {
    cfg!(debug_assertions)
}

fn default_custom_map() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("dimension1".to_string(), "measurement_type".to_string()),
        ("dimension2".to_string(), "scaling_method".to_string()),
    ])
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            tracking_id: default_tracking_id(),
            platform_marker: default_platform_marker(),
            script_base_url: default_script_base_url(),
            debug: default_debug(),
            custom_map: default_custom_map(),
        }
    }
}

impl AnalyticsConfig {
    /// Parse a JSON override. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Like [`from_json`](Self::from_json) but falls back to the defaults on
    /// malformed input, returning the parse error alongside for logging.
    pub fn from_json_or_default(json: &str) -> (Self, Option<TrackError>) {
        match Self::from_json(json) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Measurement ids are short ASCII tokens like `G-ABC123`; anything else
    /// would have to be escaped into the script URL, so it is rejected.
    pub fn validate_tracking_id(&self) -> Result<&str, TrackError> {
        let id = self.tracking_id.as_str();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(id)
        } else {
            Err(TrackError::InvalidTrackingId(self.tracking_id.clone()))
        }
    }

    /// URL of the remote tag script for this tracking id.
    pub fn script_url(&self) -> Result<String, TrackError> {
        let id = self.validate_tracking_id()?;
        Ok(format!("{}?id={}", self.script_base_url, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_custom_map() {
        let config = AnalyticsConfig::default();
        assert_eq!(
            config.custom_map.get("dimension1").map(String::as_str),
            Some("measurement_type")
        );
        assert_eq!(
            config.custom_map.get("dimension2").map(String::as_str),
            Some("scaling_method")
        );
        assert_eq!(config.custom_map.len(), 2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalyticsConfig::from_json(r#"{"tracking_id": "G-TEST123"}"#).unwrap();
        assert_eq!(config.tracking_id, "G-TEST123");
        assert_eq!(config.platform_marker, "vercel.app");
        assert_eq!(config.script_base_url, DEFAULT_SCRIPT_BASE_URL);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let (config, err) = AnalyticsConfig::from_json_or_default("{not json");
        assert!(err.is_some());
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_script_url() {
        let config = AnalyticsConfig {
            tracking_id: "G-ABC123".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.script_url().unwrap(),
            "https://www.googletagmanager.com/gtag/js?id=G-ABC123"
        );
    }

    #[test]
    fn test_tracking_id_validation() {
        for bad in ["", "G-1 2", "G-1&x=y", "<script>"] {
            let config = AnalyticsConfig {
                tracking_id: bad.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(config.script_url(), Err(TrackError::InvalidTrackingId(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
