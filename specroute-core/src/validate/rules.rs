//! Type-dispatched validation of a single value against a compiled schema.
//!
//! Every function returns the normalized value instead of touching its
//! input; callers substitute it themselves.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ValidationError;
use crate::schema::{AdditionalProperties, Schema};
use crate::value::{Numeric, ParamValue};

pub const INT32_MIN: i128 = -2_147_483_647;
pub const INT32_MAX: i128 = 2_147_483_647;
pub const INT64_MIN: i128 = -9_223_372_036_854_775_807;
pub const INT64_MAX: i128 = 9_223_372_036_854_775_807;

pub fn validate_param(value: &Value, schema: &Schema, path: &str) -> Result<ParamValue, ValidationError> {
    match schema.type_name.as_deref() {
        Some("string") => validate_string(value, schema, path),
        Some("integer") | Some("number") => validate_number(value, schema, path),
        Some("boolean") => validate_boolean(value, path),
        Some("array") => validate_array(value, schema, path),
        Some("object") => validate_object(value, schema, path),
        _ => Err(ValidationError::UnknownType {
            path: path.to_string(),
            type_name: schema.type_name.clone(),
        }),
    }
}

pub fn validate_string(value: &Value, schema: &Schema, path: &str) -> Result<ParamValue, ValidationError> {
    let Some(s) = value.as_str() else {
        return Err(mismatch(path, "string", value));
    };
    let len = s.chars().count() as u64;

    if let Some(min_length) = schema.min_length {
        if len < min_length {
            return Err(ValidationError::TooShort {
                path: path.to_string(),
                min_length,
            });
        }
    }
    if let Some(max_length) = schema.max_length {
        if len > max_length {
            return Err(ValidationError::TooLong {
                path: path.to_string(),
                max_length,
            });
        }
    }
    if let Some(re) = &schema.pattern {
        if !re.is_match(s) {
            return Err(ValidationError::PatternMismatch {
                path: path.to_string(),
                pattern: re.as_str().to_string(),
            });
        }
    }

    validate_enum(ParamValue::String(s.to_string()), schema, path)
}

/// Dispatches on the value's runtime representation, not only the declared
/// type: an integer with `format: float|double` is coerced, a float against
/// `type: integer` is rejected.
pub fn validate_number(value: &Value, schema: &Schema, path: &str) -> Result<ParamValue, ValidationError> {
    let numeric = match value {
        Value::Number(n) => Numeric::from_number(n),
        _ => None,
    };
    let declared_integer = schema.type_name.as_deref() == Some("integer");
    let float_format = schema.format_is("float") || schema.format_is("double");

    let out = match numeric {
        Some(n @ Numeric::Float(_)) if !declared_integer => validate_float(n, schema, path, false)?,
        Some(n @ Numeric::Int(_)) if float_format => validate_float(n, schema, path, true)?,
        Some(Numeric::Int(i)) => validate_int(i, schema, path)?,
        Some(Numeric::Float(_)) => {
            return Err(ValidationError::NotAnInteger {
                path: path.to_string(),
            })
        }
        _ => return Err(mismatch(path, "number", value)),
    };

    validate_enum(out, schema, path)
}

/// Integer bounds, with `int32`/`int64` formats supplying default limits
/// for whichever of `minimum`/`maximum` is not declared.
pub fn validate_int(value: i128, schema: &Schema, path: &str) -> Result<ParamValue, ValidationError> {
    let (default_min, default_max) = match schema.format.as_deref() {
        Some("int32") => (Some(INT32_MIN), Some(INT32_MAX)),
        Some("int64") => (Some(INT64_MIN), Some(INT64_MAX)),
        _ => (None, None),
    };
    let minimum = schema.minimum.or(default_min.map(Numeric::Int));
    let maximum = schema.maximum.or(default_max.map(Numeric::Int));

    check_bounds(Numeric::Int(value), schema, minimum, maximum, path)?;
    Ok(ParamValue::Int(value))
}

/// `format: double` moves to decimal arithmetic when the value has an exact
/// decimal form and keeps the original number otherwise; `force_convert`
/// turns an integer into a plain float.
pub fn validate_float(
    value: Numeric,
    schema: &Schema,
    path: &str,
    force_convert: bool,
) -> Result<ParamValue, ValidationError> {
    let decimal = schema.format_is("double").then(|| value.to_decimal()).flatten();
    let normalized = match decimal {
        Some(d) => Numeric::Decimal(d),
        None if force_convert => Numeric::Float(value.to_f64()),
        None => value,
    };

    check_bounds(normalized, schema, schema.minimum, schema.maximum, path)?;
    Ok(match normalized {
        Numeric::Int(i) => ParamValue::Int(i),
        Numeric::Float(f) => ParamValue::Float(f),
        Numeric::Decimal(d) => ParamValue::Decimal(d),
    })
}

// Maximum, then minimum, then multipleOf; the first failure wins.
fn check_bounds(
    value: Numeric,
    schema: &Schema,
    minimum: Option<Numeric>,
    maximum: Option<Numeric>,
    path: &str,
) -> Result<(), ValidationError> {
    if let Some(max) = maximum {
        let ord = value.compare(max);
        let violated = if schema.exclusive_maximum {
            matches!(ord, Some(Ordering::Greater | Ordering::Equal))
        } else {
            ord == Some(Ordering::Greater)
        };
        if violated {
            return Err(ValidationError::AboveMaximum {
                path: path.to_string(),
                maximum: max.to_string(),
                exclusive: schema.exclusive_maximum,
            });
        }
    }

    if let Some(min) = minimum {
        let ord = value.compare(min);
        let violated = if schema.exclusive_minimum {
            matches!(ord, Some(Ordering::Less | Ordering::Equal))
        } else {
            ord == Some(Ordering::Less)
        };
        if violated {
            return Err(ValidationError::BelowMinimum {
                path: path.to_string(),
                minimum: min.to_string(),
                exclusive: schema.exclusive_minimum,
            });
        }
    }

    if let Some(m) = schema.multiple_of {
        if value.is_multiple_of(m) == Some(false) {
            return Err(ValidationError::NotMultipleOf {
                path: path.to_string(),
                multiple_of: m.to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_boolean(value: &Value, path: &str) -> Result<ParamValue, ValidationError> {
    match value {
        Value::Bool(b) => Ok(ParamValue::Bool(*b)),
        other => Err(mismatch(path, "boolean", other)),
    }
}

pub fn validate_enum(value: ParamValue, schema: &Schema, path: &str) -> Result<ParamValue, ValidationError> {
    match &schema.enum_values {
        Some(members) if !members.iter().any(|m| value.matches_json(m)) => Err(ValidationError::NotInEnum {
            path: path.to_string(),
        }),
        _ => Ok(value),
    }
}

pub fn validate_array(value: &Value, schema: &Schema, path: &str) -> Result<ParamValue, ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(mismatch(path, "array", value));
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let normalized = match &schema.items {
            Some(item_schema) => validate_param(item, item_schema, &format!("{path}[{i}]"))?,
            None => ParamValue::from(item),
        };
        out.push(normalized);
    }
    Ok(ParamValue::Array(out))
}

pub fn validate_object(value: &Value, schema: &Schema, path: &str) -> Result<ParamValue, ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(mismatch(path, "object", value));
    };

    let mut out = BTreeMap::new();
    for (key, member) in map {
        let member_path = format!("{path}.{key}");
        let normalized = if let Some(prop_schema) = schema.properties.get(key) {
            validate_param(member, prop_schema, &member_path)?
        } else {
            match &schema.additional_properties {
                AdditionalProperties::Schema(extra) => validate_param(member, extra, &member_path)?,
                AdditionalProperties::Allowed => ParamValue::from(member),
                AdditionalProperties::Forbidden => {
                    return Err(ValidationError::UnknownProperty {
                        path: path.to_string(),
                        property: key.clone(),
                    })
                }
            }
        };
        out.insert(key.clone(), normalized);
    }
    Ok(ParamValue::Object(out))
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: json_type_name(found),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
