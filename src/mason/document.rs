//! Mason response documents.
//!
//! A [`Document`] is an insertion-ordered JSON object plus the reserved
//! `@controls`, `@namespaces` and `@error` sections of the Mason media
//! type. Data fields and reserved sections live side by side; the
//! reserved keys are only ever written through the dedicated methods.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::control::Control;

/// Content type of every response body, success or error.
pub const MASON: &str = "application/vnd.mason+json";

pub const CONTROLS_KEY: &str = "@controls";
pub const NAMESPACES_KEY: &str = "@namespaces";
pub const ERROR_KEY: &str = "@error";

fn is_reserved(key: &str) -> bool {
    key == CONTROLS_KEY || key == NAMESPACES_KEY || key == ERROR_KEY
}

/// One response body under construction.
///
/// Built fresh per request, mutated in place while the handler decorates
/// it, then serialized exactly once. Serialization preserves insertion
/// order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Document {
    fields: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a data field.
    ///
    /// Panics if `key` is one of the reserved Mason keys; those are
    /// managed through [`add_control`](Self::add_control),
    /// [`add_namespace`](Self::add_namespace) and
    /// [`add_error`](Self::add_error).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        assert!(!is_reserved(&key), "reserved Mason key used as data: {key}");
        self.fields.insert(key, value.into());
    }

    /// Builder-style [`insert`](Self::insert) for literal construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Attaches `control` under `relation`, overwriting any control
    /// previously attached under the same relation.
    ///
    /// Panics if `@controls` is present but not an object, which can only
    /// happen if the reserved key was smuggled in as data.
    pub fn add_control(&mut self, relation: impl Into<String>, control: Control) {
        let controls = self
            .fields
            .entry(CONTROLS_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match controls {
            Value::Object(map) => {
                map.insert(relation.into(), control.into_value());
            }
            _ => panic!("{CONTROLS_KEY} is not an object"),
        }
    }

    /// Registers a control namespace (`prefix` → `{ "name": uri }`).
    ///
    /// Panics under the same conditions as
    /// [`add_control`](Self::add_control).
    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let namespaces = self
            .fields
            .entry(NAMESPACES_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match namespaces {
            Value::Object(map) => {
                map.insert(prefix.into(), json!({ "name": uri.into() }));
            }
            _ => panic!("{NAMESPACES_KEY} is not an object"),
        }
    }

    /// Sets the `@error` section. `message` becomes the single entry of
    /// `@messages`; without one the list is empty.
    pub fn add_error(&mut self, title: impl Into<String>, message: Option<&str>) {
        let messages: Vec<&str> = message.into_iter().collect();
        self.fields.insert(
            ERROR_KEY.to_string(),
            json!({ "@message": title.into(), "@messages": messages }),
        );
    }

    /// Looks up a field (data or reserved) by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.fields.into_iter().collect())
    }
}

/// Builds the uniform failure body: the requested path plus an `@error`
/// section. The HTTP status class travels on the transport, not in here.
pub fn error_document(resource_url: &str, title: &str, message: Option<&str>) -> Document {
    let mut body = Document::new().with("resource_url", resource_url);
    body.add_error(title, message);
    body
}
