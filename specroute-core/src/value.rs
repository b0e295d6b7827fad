//! Normalized parameter values and the numeric model used for comparisons.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;

/// A validated parameter value. Numbers keep the representation the
/// validator settled on: `format: double` yields `Decimal`, `format: float`
/// yields `Float` even for integer input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Decimal(Decimal),
    String(String),
    Array(Vec<ParamValue>),
    Object(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            ParamValue::Int(i) => Some(Numeric::Int(*i)),
            ParamValue::Float(f) => Some(Numeric::Float(*f)),
            ParamValue::Decimal(d) => Some(Numeric::Decimal(*d)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Equality against a raw contract value (enum members). Numbers compare
    /// by value across int/float/decimal; booleans never equal numbers.
    pub fn matches_json(&self, other: &serde_json::Value) -> bool {
        use serde_json::Value;
        match (self, other) {
            (ParamValue::Null, Value::Null) => true,
            (ParamValue::Bool(a), Value::Bool(b)) => a == b,
            (ParamValue::String(a), Value::String(b)) => a == b,
            (ParamValue::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.matches_json(y))
            }
            (ParamValue::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| b.get(k).is_some_and(|o| v.matches_json(o)))
            }
            (mine, Value::Number(n)) => match (mine.as_numeric(), Numeric::from_number(n)) {
                (Some(a), Some(b)) => a.compare(b) == Some(Ordering::Equal),
                _ => false,
            },
            _ => false,
        }
    }
}

impl From<&serde_json::Value> for ParamValue {
    fn from(v: &serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(*b),
            Value::Number(n) => match Numeric::from_number(n) {
                Some(Numeric::Int(i)) => ParamValue::Int(i),
                Some(Numeric::Float(f)) => ParamValue::Float(f),
                Some(Numeric::Decimal(d)) => ParamValue::Decimal(d),
                None => ParamValue::Null,
            },
            Value::String(s) => ParamValue::String(s.clone()),
            Value::Array(items) => ParamValue::Array(items.iter().map(ParamValue::from).collect()),
            Value::Object(map) => ParamValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), ParamValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i128),
    Float(f64),
    Decimal(Decimal),
}

impl Numeric {
    pub fn from_number(n: &serde_json::Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Some(Numeric::Int(i as i128))
        } else if let Some(u) = n.as_u64() {
            Some(Numeric::Int(u as i128))
        } else {
            n.as_f64().map(Numeric::Float)
        }
    }

    pub fn from_json(v: &serde_json::Value) -> Option<Self> {
        v.as_number().and_then(Self::from_number)
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
            Numeric::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Integers convert exactly; floats through their shortest decimal form.
    /// `None` when the decimal would not read back as the same number, which
    /// covers magnitudes beyond 28 digits on either side of the point.
    pub fn to_decimal(self) -> Option<Decimal> {
        match self {
            Numeric::Int(i) => Decimal::try_from_i128_with_scale(i, 0).ok(),
            Numeric::Float(f) => Decimal::from_f64(f).filter(|d| d.to_f64() == Some(f)),
            Numeric::Decimal(d) => Some(d),
        }
    }

    pub fn compare(self, other: Numeric) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(&b)),
            (Numeric::Decimal(_), _) | (_, Numeric::Decimal(_)) => {
                match (self.to_decimal(), other.to_decimal()) {
                    (Some(a), Some(b)) => Some(a.cmp(&b)),
                    _ => self.to_f64().partial_cmp(&other.to_f64()),
                }
            }
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// `None` when the remainder cannot be computed (zero divisor).
    pub fn is_multiple_of(self, divisor: Numeric) -> Option<bool> {
        match (self, divisor) {
            (Numeric::Int(a), Numeric::Int(b)) => a.checked_rem(b).map(|r| r == 0),
            (Numeric::Decimal(_), _) | (_, Numeric::Decimal(_)) => {
                let a = self.to_decimal()?;
                let b = divisor.to_decimal()?;
                a.checked_rem(b).map(|r| r.is_zero())
            }
            _ => {
                let b = divisor.to_f64();
                (b != 0.0).then(|| self.to_f64() % b == 0.0)
            }
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(i) => write!(f, "{i}"),
            Numeric::Float(x) => write!(f, "{x}"),
            Numeric::Decimal(d) => write!(f, "{d}"),
        }
    }
}
