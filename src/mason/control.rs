//! Hypermedia control descriptors.

use serde_json::{Map, Value};

/// HTTP method a control tells the client to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Delete,
    Put,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a body.
    pub fn has_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

/// A single affordance: where the follow-up request goes, with which
/// method, and (for body-bearing methods) what document it accepts.
///
/// Controls are owned by the document they are attached to and never
/// shared. A schema is advisory; a body-bearing control without one is
/// valid.
#[derive(Debug, Clone)]
pub struct Control {
    href: String,
    method: Method,
    encoding: Option<&'static str>,
    title: Option<String>,
    schema: Option<Value>,
}

impl Control {
    fn new(method: Method, href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method,
            encoding: None,
            title: None,
            schema: None,
        }
    }

    pub fn get(href: impl Into<String>) -> Self {
        Self::new(Method::Get, href)
    }

    pub fn post(href: impl Into<String>) -> Self {
        Self::new(Method::Post, href)
    }

    pub fn delete(href: impl Into<String>) -> Self {
        Self::new(Method::Delete, href)
    }

    pub fn put(href: impl Into<String>) -> Self {
        Self::new(Method::Put, href)
    }

    pub fn patch(href: impl Into<String>) -> Self {
        Self::new(Method::Patch, href)
    }

    /// Declares the request body encoding. Only meaningful on methods
    /// that carry a body.
    pub fn encoding(mut self, encoding: &'static str) -> Self {
        debug_assert!(self.method.has_body(), "encoding on a body-less method");
        self.encoding = Some(encoding);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attaches the JSON schema the target accepts.
    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Renders the object stored under `@controls`.
    pub(crate) fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("href".to_string(), Value::String(self.href));
        map.insert("method".to_string(), self.method.as_str().into());
        if let Some(encoding) = self.encoding {
            map.insert("encoding".to_string(), encoding.into());
        }
        if let Some(title) = self.title {
            map.insert("title".to_string(), Value::String(title));
        }
        if let Some(schema) = self.schema {
            map.insert("schema".to_string(), schema);
        }
        Value::Object(map)
    }
}
