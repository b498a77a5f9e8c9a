//! Entry points for pages that drive the tracker from plain JavaScript.

use crate::analytics;
use crate::config::AnalyticsConfig;
use crate::diagnostics::{ConsoleDiagnostics, Diagnostics};
use crate::event::Properties;
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Parse a JSON object into event properties. Anything but an object is
/// rejected.
fn properties_from_json(json: &str) -> Option<Properties> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn extra_properties(extra: &JsValue) -> Option<Properties> {
    if extra.is_undefined() || extra.is_null() {
        return None;
    }
    let parsed = js_sys::JSON::stringify(extra)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|json| properties_from_json(&json));
    if parsed.is_none() {
        ConsoleDiagnostics.warn("trackEvent: extra properties must be a plain object, ignoring");
    }
    parsed
}

/// Override the default configuration with a JSON object. Must be called
/// before `initialize`.
#[wasm_bindgen(js_name = configure)]
pub fn js_configure(json: &str) {
    let (config, err) = AnalyticsConfig::from_json_or_default(json);
    if let Some(e) = err {
        ConsoleDiagnostics.warn(&format!("invalid configuration (using defaults): {}", e));
    }
    analytics::configure(config);
}

#[wasm_bindgen(js_name = initialize)]
pub fn js_initialize() {
    console_error_panic_hook::set_once();
    analytics::initialize();
}

#[wasm_bindgen(js_name = pageView)]
pub fn js_page_view(url: &str, title: Option<String>) {
    analytics::page_view(url, title.as_deref());
}

#[wasm_bindgen(js_name = trackEvent)]
pub fn js_track_event(
    action: &str,
    category: &str,
    label: Option<String>,
    value: Option<f64>,
    extra: JsValue,
) {
    let extra = extra_properties(&extra);
    analytics::track_event(action, category, label.as_deref(), value, extra);
}

#[wasm_bindgen(js_name = environment)]
pub fn js_environment() -> String {
    analytics::current_environment().label().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_properties_from_object() {
        let props = properties_from_json(r#"{"extra": "x", "count": 3}"#).unwrap();
        assert_eq!(props.get("extra"), Some(&json!("x")));
        assert_eq!(props.get("count"), Some(&json!(3)));
    }

    #[test]
    fn test_non_objects_rejected() {
        for json in ["[1, 2]", "\"text\"", "42", "null", "not json"] {
            assert!(properties_from_json(json).is_none(), "{} should be rejected", json);
        }
    }
}
