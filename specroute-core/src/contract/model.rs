use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn location_from_str(s: &str) -> Option<ParamLocation> {
    match s {
        "path" => Some(ParamLocation::Path),
        "query" => Some(ParamLocation::Query),
        "header" => Some(ParamLocation::Header),
        "cookie" => Some(ParamLocation::Cookie),
        _ => None,
    }
}

pub fn method_keys() -> &'static [&'static str] {
    &[
        "get", "put", "post", "delete", "options", "head", "patch", "trace",
    ]
}

/// One `(template, method, operation)` entry of a contract's `paths`.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    pub template: &'a str,
    pub method: &'static str,
    pub definition: &'a serde_json::Value,
    pub path_item: &'a serde_json::Map<String, serde_json::Value>,
}

impl<'a> OperationRef<'a> {
    pub fn operation_id(&self) -> Option<&'a str> {
        self.definition.get("operationId").and_then(|v| v.as_str())
    }

    /// Parameter objects for this operation, path-item entries first, with
    /// operation-level entries replacing path-level ones of the same
    /// `(name, in)`.
    pub fn parameters(&self) -> Vec<&'a serde_json::Value> {
        let mut out: Vec<&'a serde_json::Value> = Vec::new();
        let path_level = self.path_item.get("parameters").and_then(|v| v.as_array());
        let op_level = self.definition.get("parameters").and_then(|v| v.as_array());

        for p in path_level.into_iter().flatten() {
            out.push(p);
        }
        for p in op_level.into_iter().flatten() {
            let key = param_key(p);
            if key.is_some() {
                out.retain(|existing| param_key(existing) != key);
            }
            out.push(p);
        }
        out
    }
}

fn param_key(p: &serde_json::Value) -> Option<(&str, ParamLocation)> {
    let name = p.get("name").and_then(|v| v.as_str())?;
    Some((name, param_location(p)))
}

/// Location declared by a parameter object; `query` when absent or unknown.
pub(crate) fn param_location(p: &serde_json::Value) -> ParamLocation {
    p.get("in")
        .and_then(|v| v.as_str())
        .and_then(location_from_str)
        .unwrap_or(ParamLocation::Query)
}
