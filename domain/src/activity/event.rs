//! Activity events and their detail payloads
//!
//! The backend attaches a loosely typed payload to each step: a sentence, a
//! list of queries, a list of `{label, value}` source links, or any other
//! JSON value. [`EventData`] keeps that shape and [`EventData::detail_lines`]
//! flattens it into renderable lines without ever failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A discrete step record emitted during a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub title: String,
    pub data: EventData,
}

impl ActivityEvent {
    pub fn new(title: impl Into<String>, data: EventData) -> Self {
        Self {
            title: title.into(),
            data,
        }
    }

    pub fn text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, EventData::Text(text.into()))
    }

    /// Whether the row for this event may be expanded
    pub fn has_detail(&self) -> bool {
        self.data.has_detail()
    }
}

/// Detail payload of an [`ActivityEvent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    Text(String),
    Details(Vec<EventDetail>),
    Structured(Value),
}

/// One element of a detail sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventDetail {
    /// Rendered as a link: `label` is shown, `value` is the URL
    Link { label: String, value: String },
    /// Rendered as text; non-string values are serialized
    Plain(Value),
}

/// A single rendered line of event detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine {
    Text(String),
    Link { label: String, url: String },
}

impl EventData {
    /// Classify an arbitrary JSON value by shape
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => EventData::Text(s),
            Value::Array(items) => {
                EventData::Details(items.into_iter().map(EventDetail::from_value).collect())
            }
            other => EventData::Structured(other),
        }
    }

    /// `false` for blank text, empty sequences and empty/null structured values
    pub fn has_detail(&self) -> bool {
        match self {
            EventData::Text(s) => !s.trim().is_empty(),
            EventData::Details(items) => !items.is_empty(),
            EventData::Structured(value) => match value {
                Value::Null => false,
                Value::Object(map) => !map.is_empty(),
                Value::Array(items) => !items.is_empty(),
                Value::String(s) => !s.trim().is_empty(),
                Value::Bool(_) | Value::Number(_) => true,
            },
        }
    }

    /// Flatten the payload into display lines.
    ///
    /// Text keeps its own line breaks. Each sequence element becomes one
    /// line (a link when it has the `{label, value}` shape). Any other value
    /// is pretty-printed as indented JSON.
    pub fn detail_lines(&self) -> Vec<DetailLine> {
        if !self.has_detail() {
            return Vec::new();
        }
        match self {
            EventData::Text(s) => text_lines(s),
            EventData::Details(items) => items.iter().flat_map(EventDetail::lines).collect(),
            EventData::Structured(value) => text_lines(&pretty(value)),
        }
    }
}

impl Default for EventData {
    fn default() -> Self {
        EventData::Structured(Value::Null)
    }
}

impl From<Value> for EventData {
    fn from(value: Value) -> Self {
        EventData::from_value(value)
    }
}

impl EventDetail {
    pub fn link(label: impl Into<String>, value: impl Into<String>) -> Self {
        EventDetail::Link {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        EventDetail::Plain(Value::String(text.into()))
    }

    pub fn from_value(value: Value) -> Self {
        if let Value::Object(map) = &value
            && let (Some(Value::String(label)), Some(Value::String(url))) =
                (map.get("label"), map.get("value"))
        {
            return EventDetail::link(label.clone(), url.clone());
        }
        EventDetail::Plain(value)
    }

    fn lines(&self) -> Vec<DetailLine> {
        match self {
            EventDetail::Link { label, value } => vec![DetailLine::Link {
                label: label.clone(),
                url: value.clone(),
            }],
            EventDetail::Plain(Value::String(s)) => text_lines(s),
            EventDetail::Plain(other) => vec![DetailLine::Text(compact(other))],
        }
    }
}

fn text_lines(text: &str) -> Vec<DetailLine> {
    text.lines().map(|l| DetailLine::Text(l.to_string())).collect()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}
