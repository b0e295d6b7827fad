use std::path::{Path, PathBuf};

use crate::error::LoadError;

pub(crate) const DEFAULT_FILE_NAMES: [&str; 2] = ["openapi-spec.yml", "openapi-spec.yaml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DocumentFormat::Json,
            Some("yml") | Some("yaml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Auto,
        }
    }
}

pub fn parse_contract_str(input: &str, format: DocumentFormat) -> Result<serde_json::Value, LoadError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(input)?),
        DocumentFormat::Yaml => yaml_to_json(input),
        DocumentFormat::Auto => parse_auto(input),
    }
}

fn yaml_to_json(input: &str) -> Result<serde_json::Value, LoadError> {
    let y = serde_yaml::from_str::<serde_yaml::Value>(input)?;
    // serde_yaml's Value serializes into the JSON data model; mappings with
    // non-string keys are the only failure and surface as a YAML error.
    serde_yaml::from_value::<serde_json::Value>(y).map_err(LoadError::Yaml)
}

fn parse_auto(input: &str) -> Result<serde_json::Value, LoadError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str(input) {
            Ok(v) => Ok(v),
            Err(e) => yaml_to_json(input).map_err(|_| LoadError::Json(e)),
        };
    }

    match yaml_to_json(input) {
        Ok(v) => Ok(v),
        Err(e) => serde_json::from_str(input).map_err(|_| e),
    }
}

pub(crate) fn read_contract_file(path: &Path) -> Result<serde_json::Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            searched: vec![path.to_path_buf()],
        });
    }
    let body = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_contract_str(&body, DocumentFormat::from_path(path))
}

/// First of `openapi-spec.yml`, `openapi-spec.yaml` present in `dir`.
pub(crate) fn discover(dir: &Path) -> Result<PathBuf, LoadError> {
    let candidates: Vec<PathBuf> = DEFAULT_FILE_NAMES.iter().map(|n| dir.join(n)).collect();
    match candidates.iter().find(|p| p.is_file()) {
        Some(found) => Ok(found.clone()),
        None => Err(LoadError::NotFound { searched: candidates }),
    }
}
