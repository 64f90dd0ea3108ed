//! The UI capabilities the wizard needs: scrolling and analytics events.
//!
//! Kept behind traits so the wizard runs headless in tests and on the
//! server side.

use serde_json::{Map, Value};
use tracing::{debug, info};

/// Analytics events emitted by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Start,
    SubmitAttempt,
    SubmitSuccess,
    SubmitError,
}

impl FormEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "form_start",
            Self::SubmitAttempt => "form_submit_attempt",
            Self::SubmitSuccess => "form_submit_success",
            Self::SubmitError => "form_submit_error",
        }
    }
}

impl std::fmt::Display for FormEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fire-and-forget event tracking. Implementations must not block or fail.
pub trait EventSink: Send + Sync {
    fn track(&self, event: FormEvent, properties: &Map<String, Value>);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn track(&self, _event: FormEvent, _properties: &Map<String, Value>) {}
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn track(&self, event: FormEvent, properties: &Map<String, Value>) {
        let properties = Value::Object(properties.clone());
        info!(event = event.as_str(), %properties, "Event tracked");
    }
}

/// What the wizard may ask of its host UI.
pub trait UiEnvironment {
    /// Bring the element with `anchor` into view.
    fn scroll_to(&self, anchor: &str);

    fn track(&self, event: FormEvent, properties: Map<String, Value>);
}

/// Environment with no screen: scrolling is a no-op, events go to a sink.
#[derive(Debug, Default, Clone)]
pub struct HeadlessEnvironment<S> {
    sink: S,
}

impl<S: EventSink> HeadlessEnvironment<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: EventSink> UiEnvironment for HeadlessEnvironment<S> {
    fn scroll_to(&self, anchor: &str) {
        debug!(anchor, "Scroll requested without a screen");
    }

    fn track(&self, event: FormEvent, properties: Map<String, Value>) {
        self.sink.track(event, &properties);
    }
}
