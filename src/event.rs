use crate::config::AnalyticsConfig;
use crate::error::TrackError;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Flat property bag sent alongside an event.
pub type Properties = Map<String, Value>;

pub const PAGE_VIEW_EVENT: &str = "page_view";

/// A custom event, shaped for the Google tag.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    action: String,
    category: String,
    label: Option<String>,
    value: Option<f64>,
    extra: Properties,
}

impl EventRecord {
    /// Both `action` and `category` must contain something other than whitespace.
    pub fn new(action: impl Into<String>, category: impl Into<String>) -> Result<Self, TrackError> {
        let action = action.into();
        let category = category.into();
        if action.trim().is_empty() {
            return Err(TrackError::EmptyField("action"));
        }
        if category.trim().is_empty() {
            return Err(TrackError::EmptyField("category"));
        }
        Ok(Self {
            action,
            category,
            label: None,
            value: None,
            extra: Properties::new(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.extra.extend(properties);
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn extra(&self) -> &Properties {
        &self.extra
    }

    /// Properties as transmitted.
    ///
    /// The named fields go in first and `extra` is spread over them, so an
    /// extra key called `event_category`, `event_label` or `value` replaces
    /// the named parameter. Absent label/value and non-finite values are
    /// omitted.
    pub fn to_properties(&self) -> Properties {
        let mut props = Properties::new();
        props.insert("event_category".into(), Value::String(self.category.clone()));
        if let Some(label) = &self.label {
            props.insert("event_label".into(), Value::String(label.clone()));
        }
        if let Some(number) = self.value.and_then(Number::from_f64) {
            props.insert("value".into(), Value::Number(number));
        }
        for (key, value) in &self.extra {
            props.insert(key.clone(), value.clone());
        }
        props
    }
}

/// Fixed `config` parameters sent once at installation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigParams {
    pub send_page_view: bool,
    pub anonymize_ip: bool,
    pub allow_google_signals: bool,
    pub allow_ad_personalization_signals: bool,
    pub custom_map: BTreeMap<String, String>,
}

impl ConfigParams {
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            send_page_view: false,
            anonymize_ip: true,
            allow_google_signals: false,
            allow_ad_personalization_signals: false,
            custom_map: config.custom_map.clone(),
        }
    }
}

/// The three `gtag(...)` call shapes this crate emits.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `gtag("js", new Date(timestamp_ms))`
    Js { timestamp_ms: f64 },
    /// `gtag("config", tracking_id, params)`
    Config {
        tracking_id: String,
        params: ConfigParams,
    },
    /// `gtag("event", name, params)`
    Event { name: String, params: Properties },
}

impl Command {
    pub fn event(record: &EventRecord) -> Self {
        Command::Event {
            name: record.action.clone(),
            params: record.to_properties(),
        }
    }

    pub fn page_view(location: &str, title: &str, referrer: &str) -> Self {
        let mut params = Properties::new();
        params.insert("page_location".into(), Value::String(location.to_string()));
        params.insert("page_title".into(), Value::String(title.to_string()));
        params.insert("page_referrer".into(), Value::String(referrer.to_string()));
        Command::Event {
            name: PAGE_VIEW_EVENT.to_string(),
            params,
        }
    }

    /// First argument of the `gtag` call.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Js { .. } => "js",
            Command::Config { .. } => "config",
            Command::Event { .. } => "event",
        }
    }
}
