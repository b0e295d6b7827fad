//! Compiled parameter schemas.
//!
//! A [`Schema`] is built once from the contract's JSON and is read-only
//! afterwards; regular expressions are compiled at this point, at every
//! nesting depth, and never per request.

mod pattern;

use std::collections::BTreeMap;

pub use pattern::Pattern;

use crate::error::SchemaError;
use crate::value::Numeric;

#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub type_name: Option<String>,
    pub format: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<Pattern>,
    pub minimum: Option<Numeric>,
    pub maximum: Option<Numeric>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<Numeric>,
    pub enum_values: Option<Vec<serde_json::Value>>,
    pub items: Option<Box<Schema>>,
    pub properties: BTreeMap<String, Schema>,
    pub additional_properties: AdditionalProperties,
}

/// How an object schema treats keys not listed under `properties`.
#[derive(Debug, Clone, Default)]
pub enum AdditionalProperties {
    #[default]
    Forbidden,
    Allowed,
    Schema(Box<Schema>),
}

impl Schema {
    pub fn compile(raw: &serde_json::Value) -> Result<Self, SchemaError> {
        compile_at(raw, "#")
    }

    pub fn of_type(type_name: &str) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            ..Self::default()
        }
    }

    pub fn format_is(&self, format: &str) -> bool {
        self.format.as_deref() == Some(format)
    }
}

pub(crate) fn compile_at(raw: &serde_json::Value, path: &str) -> Result<Schema, SchemaError> {
    let str_field = |key: &str| raw.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());
    let flag = |key: &str| raw.get(key).and_then(|v| v.as_bool()).unwrap_or(false);

    let pattern = match raw.get("pattern").and_then(|v| v.as_str()) {
        Some(p) => Some(Pattern::new(p).map_err(|source| SchemaError::InvalidPattern {
            path: format!("{path}/pattern"),
            source,
        })?),
        None => None,
    };

    let multiple_of = raw.get("multipleOf").and_then(Numeric::from_json);
    let multiple_of = match multiple_of {
        Some(m) if m.to_f64() > 0.0 => Some(m),
        Some(m) => {
            tracing::warn!(path, multiple_of = %m, "ignoring non-positive multipleOf");
            None
        }
        None => None,
    };

    let items = match raw.get("items") {
        Some(items) if items.is_object() => Some(Box::new(compile_at(items, &format!("{path}/items"))?)),
        _ => None,
    };

    let mut properties = BTreeMap::new();
    if let Some(props) = raw.get("properties").and_then(|v| v.as_object()) {
        for (name, prop) in props {
            let prop_path = format!("{path}/properties/{name}");
            properties.insert(name.clone(), compile_at(prop, &prop_path)?);
        }
    }

    let additional_properties = match raw.get("additionalProperties") {
        Some(v @ serde_json::Value::Object(_)) => AdditionalProperties::Schema(Box::new(compile_at(
            v,
            &format!("{path}/additionalProperties"),
        )?)),
        Some(serde_json::Value::Bool(true)) => AdditionalProperties::Allowed,
        _ => AdditionalProperties::Forbidden,
    };

    Ok(Schema {
        type_name: str_field("type"),
        format: str_field("format"),
        min_length: raw.get("minLength").and_then(|v| v.as_u64()),
        max_length: raw.get("maxLength").and_then(|v| v.as_u64()),
        pattern,
        minimum: raw.get("minimum").and_then(Numeric::from_json),
        maximum: raw.get("maximum").and_then(Numeric::from_json),
        exclusive_minimum: flag("exclusiveMinimum"),
        exclusive_maximum: flag("exclusiveMaximum"),
        multiple_of,
        enum_values: raw.get("enum").and_then(|v| v.as_array()).cloned(),
        items,
        properties,
        additional_properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compiles_nested_patterns_once() {
        let schema = Schema::compile(&json!({
            "type": "object",
            "properties": {
                "code": {"type": "string", "pattern": "^[A-Z]{3}$"}
            },
            "additionalProperties": {"type": "string", "pattern": "^x"}
        }))
        .unwrap();

        let code = &schema.properties["code"];
        assert!(code.pattern.as_ref().unwrap().is_match("ABC"));
        match &schema.additional_properties {
            AdditionalProperties::Schema(s) => assert!(s.pattern.is_some()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn lookahead_pattern_compiles() {
        let s = Schema::compile(&json!({"type": "string", "pattern": "^(?=.*[A-Z])"})).unwrap();
        assert!(s.pattern.as_ref().unwrap().is_match("aB"));
    }

    #[test]
    fn invalid_pattern_names_its_location() {
        let err = Schema::compile(&json!({"items": {"pattern": "("}})).unwrap_err();
        let SchemaError::InvalidPattern { path, .. } = err;
        assert_eq!(path, "#/items/pattern");
    }

    #[test]
    fn additional_properties_defaults_to_forbidden() {
        let s = Schema::compile(&json!({"type": "object"})).unwrap();
        assert!(matches!(s.additional_properties, AdditionalProperties::Forbidden));
        let s = Schema::compile(&json!({"additionalProperties": false})).unwrap();
        assert!(matches!(s.additional_properties, AdditionalProperties::Forbidden));
        let s = Schema::compile(&json!({"additionalProperties": true})).unwrap();
        assert!(matches!(s.additional_properties, AdditionalProperties::Allowed));
    }
}
