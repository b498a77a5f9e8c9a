use crate::config::AnalyticsConfig;
use crate::error::TrackError;
use crate::event::Command;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, HtmlScriptElement, Window};

const GTAG: &str = "gtag";
const DATA_LAYER: &str = "dataLayer";

/// Destination for tracking commands.
pub trait Sink {
    /// Load the tag and expose the callable. Called at most once per tracker.
    fn install(&self, config: &AnalyticsConfig) -> Result<(), TrackError>;
    fn is_installed(&self) -> bool;
    fn send(&self, command: &Command) -> Result<(), TrackError>;
}

/// The Google tag: an async `<script>` plus a `dataLayer`-backed `gtag`.
///
/// The remote script drains `window.dataLayer` once it has loaded, so
/// commands sent before that are queued rather than lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct GtagSink;

impl GtagSink {
    fn gtag(window: &Window) -> Option<Function> {
        Reflect::get(window, &JsValue::from_str(GTAG))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn inject_script(window: &Window, src: &str) -> Result<(), TrackError> {
        let document = window.document().ok_or(TrackError::NoDocument)?;
        let script = document
            .create_element("script")?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| TrackError::Js("created element is not a <script>".to_string()))?;
        script.set_async(true);
        script.set_src(src);
        let head = document.head().ok_or(TrackError::NoDocument)?;
        head.append_child(&script)?;
        Ok(())
    }

    fn install_queue(window: &Window) -> Result<(), TrackError> {
        let key = JsValue::from_str(DATA_LAYER);
        let existing = Reflect::get(window, &key)?;
        if !Array::is_array(&existing) {
            Reflect::set(window, &key, &Array::new())?;
        }
        // Must push the `arguments` object itself; gtag.js ignores plain arrays.
        let gtag = Function::new_no_args("window.dataLayer.push(arguments);");
        Reflect::set(window, &JsValue::from_str(GTAG), &gtag)?;
        Ok(())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, TrackError> {
    let json = serde_json::to_string(value)?;
    Ok(js_sys::JSON::parse(&json)?)
}

impl Sink for GtagSink {
    fn install(&self, config: &AnalyticsConfig) -> Result<(), TrackError> {
        let src = config.script_url()?;
        let window = window().ok_or(TrackError::NoWindow)?;
        Self::inject_script(&window, &src)?;
        Self::install_queue(&window)
    }

    fn is_installed(&self) -> bool {
        window().and_then(|w| Self::gtag(&w)).is_some()
    }

    fn send(&self, command: &Command) -> Result<(), TrackError> {
        let window = window().ok_or(TrackError::NoWindow)?;
        let gtag = Self::gtag(&window).ok_or(TrackError::NotInstalled)?;

        let args = Array::new();
        args.push(&JsValue::from_str(command.verb()));
        match command {
            Command::Js { timestamp_ms } => {
                args.push(&js_sys::Date::new(&JsValue::from_f64(*timestamp_ms)));
            }
            Command::Config { tracking_id, params } => {
                args.push(&JsValue::from_str(tracking_id));
                args.push(&to_js(params)?);
            }
            Command::Event { name, params } => {
                args.push(&JsValue::from_str(name));
                args.push(&to_js(params)?);
            }
        }
        gtag.apply(&JsValue::UNDEFINED, &args)?;
        Ok(())
    }
}
