use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while installing the tag or forwarding a command.
///
/// None of these ever reach callers of the public tracking functions; they are
/// reported to the diagnostic channel and swallowed.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("no window available (not running in a browser)")]
    NoWindow,

    #[error("no document available")]
    NoDocument,

    #[error("invalid tracking id: {0:?}")]
    InvalidTrackingId(String),

    #[error("event {0} must not be empty")]
    EmptyField(&'static str),

    #[error("gtag is not installed")]
    NotInstalled,

    #[error("javascript error: {0}")]
    Js(String),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<JsValue> for TrackError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        TrackError::Js(text)
    }
}
