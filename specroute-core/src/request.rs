use serde_json::{Map, Value};

use crate::contract::ParamLocation;

/// The framework's view of an inbound request, as far as the validator and
/// handlers need it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub method: String,
    /// Template the framework matched, e.g. `/pets/{id}`.
    pub uri_template: String,
    pub query: Map<String, Value>,
    pub path_params: Map<String, Value>,
    pub headers: Map<String, Value>,
    pub cookies: Map<String, Value>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, uri_template: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri_template: uri_template.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Value of `name` at `location`. Header names match case-insensitively;
    /// an explicit `null` counts as absent.
    pub fn param(&self, location: ParamLocation, name: &str) -> Option<&Value> {
        let found = match location {
            ParamLocation::Query => self.query.get(name),
            ParamLocation::Path => self.path_params.get(name),
            ParamLocation::Cookie => self.cookies.get(name),
            ParamLocation::Header => self
                .headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v),
        };
        found.filter(|v| !v.is_null())
    }
}
