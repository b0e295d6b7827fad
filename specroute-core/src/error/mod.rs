use std::path::PathBuf;

use thiserror::Error;

use crate::contract::ParamLocation;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to find openapi-spec.yml or openapi-spec.yaml (checked {searched:?})")]
    NotFound { searched: Vec<PathBuf> },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("contract has no `paths` mapping")]
    MissingPaths,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid pattern at {path}: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: fancy_regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Per-request parameter validation failure.
///
/// `path` names the offending value: the parameter name for top-level
/// values, `name[2]` for array elements and `name.prop` for object members.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required {location} parameter '{name}'")]
    MissingParameter { name: String, location: ParamLocation },
    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{path}: expected an integer, found a float")]
    NotAnInteger { path: String },
    #[error("{path}: shorter than minLength {min_length}")]
    TooShort { path: String, min_length: u64 },
    #[error("{path}: longer than maxLength {max_length}")]
    TooLong { path: String, max_length: u64 },
    #[error("{path}: does not match pattern {pattern}")]
    PatternMismatch { path: String, pattern: String },
    #[error("{path}: above maximum {maximum}{}", exclusive_suffix(*.exclusive))]
    AboveMaximum {
        path: String,
        maximum: String,
        exclusive: bool,
    },
    #[error("{path}: below minimum {minimum}{}", exclusive_suffix(*.exclusive))]
    BelowMinimum {
        path: String,
        minimum: String,
        exclusive: bool,
    },
    #[error("{path}: not a multiple of {multiple_of}")]
    NotMultipleOf { path: String, multiple_of: String },
    #[error("{path}: value not in enum")]
    NotInEnum { path: String },
    #[error("{path}: unknown property '{property}'")]
    UnknownProperty { path: String, property: String },
    #[error("{path}: unknown schema type {type_name:?}")]
    UnknownType {
        path: String,
        type_name: Option<String>,
    },
}

fn exclusive_suffix(exclusive: bool) -> &'static str {
    if exclusive {
        " (exclusive)"
    } else {
        ""
    }
}

impl ValidationError {
    /// Path of the offending value; for missing parameters, the parameter name.
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::MissingParameter { name, .. } => name,
            ValidationError::TypeMismatch { path, .. }
            | ValidationError::NotAnInteger { path }
            | ValidationError::TooShort { path, .. }
            | ValidationError::TooLong { path, .. }
            | ValidationError::PatternMismatch { path, .. }
            | ValidationError::AboveMaximum { path, .. }
            | ValidationError::BelowMinimum { path, .. }
            | ValidationError::NotMultipleOf { path, .. }
            | ValidationError::NotInEnum { path }
            | ValidationError::UnknownProperty { path, .. }
            | ValidationError::UnknownType { path, .. } => path,
        }
    }

    /// Stable machine-readable name of the violated constraint.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter { .. } => "missing_parameter",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::NotAnInteger { .. } => "not_an_integer",
            ValidationError::TooShort { .. } => "min_length",
            ValidationError::TooLong { .. } => "max_length",
            ValidationError::PatternMismatch { .. } => "pattern",
            ValidationError::AboveMaximum { .. } => "maximum",
            ValidationError::BelowMinimum { .. } => "minimum",
            ValidationError::NotMultipleOf { .. } => "multiple_of",
            ValidationError::NotInEnum { .. } => "enum",
            ValidationError::UnknownProperty { .. } => "unknown_property",
            ValidationError::UnknownType { .. } => "unknown_type",
        }
    }
}
