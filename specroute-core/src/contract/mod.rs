//! Contract loading: the parsed OpenAPI document and its base path.

mod loader;
mod model;

use std::path::{Path, PathBuf};

pub use loader::{parse_contract_str, DocumentFormat};
pub use model::{method_keys, OperationRef, ParamLocation};
pub(crate) use model::param_location;

use crate::error::LoadError;

/// Environment variable overriding the directory contracts and handler
/// locations are resolved against.
pub const APP_DIR_ENV: &str = "SPECROUTE_APP_DIR";

/// Where a contract comes from. Exactly one source is honored.
#[derive(Debug, Clone)]
pub enum ContractSource {
    /// `openapi-spec.yml`, then `openapi-spec.yaml`, in the application directory.
    Discover,
    File(PathBuf),
    Json(String),
    Yaml(String),
    Parsed(serde_json::Value),
}

/// A parsed OpenAPI document. Immutable once built.
#[derive(Debug, Clone)]
pub struct Contract {
    raw: serde_json::Value,
    base_path: String,
    source_path: Option<PathBuf>,
}

impl Contract {
    pub fn load(source: ContractSource, app_dir: &Path) -> Result<Self, LoadError> {
        match source {
            ContractSource::Discover => {
                let path = loader::discover(app_dir)?;
                Self::from_file(&path)
            }
            ContractSource::File(path) => {
                let path = if path.is_relative() { app_dir.join(path) } else { path };
                Self::from_file(&path)
            }
            ContractSource::Json(text) => Self::from_json_str(&text),
            ContractSource::Yaml(text) => Self::from_yaml_str(&text),
            ContractSource::Parsed(value) => Self::from_value(value),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let raw = loader::read_contract_file(path)?;
        let mut contract = Self::from_value(raw)?;
        contract.source_path = Some(path.to_path_buf());
        Ok(contract)
    }

    pub fn from_json_str(input: &str) -> Result<Self, LoadError> {
        Self::from_value(parse_contract_str(input, DocumentFormat::Json)?)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, LoadError> {
        Self::from_value(parse_contract_str(input, DocumentFormat::Yaml)?)
    }

    pub fn from_value(raw: serde_json::Value) -> Result<Self, LoadError> {
        if !raw.get("paths").is_some_and(|p| p.is_object()) {
            return Err(LoadError::MissingPaths);
        }
        let base_path = select_base_path(&raw);
        Ok(Self {
            raw,
            base_path,
            source_path: None,
        })
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Prefix prepended verbatim to every path template.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// File the contract was read from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// `(template, path item)` pairs under `paths`.
    pub fn paths(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> + '_ {
        self.raw
            .get("paths")
            .and_then(|p| p.as_object())
            .into_iter()
            .flatten()
    }

    /// Every HTTP-method entry under `paths`.
    pub fn operations(&self) -> impl Iterator<Item = OperationRef<'_>> + '_ {
        self.paths().flat_map(|(template, item)| {
            let item_obj = item.as_object();
            method_keys().iter().filter_map(move |method| {
                let path_item = item_obj?;
                let definition = path_item.get(*method)?;
                definition.is_object().then_some(OperationRef {
                    template: template.as_str(),
                    method: *method,
                    definition,
                    path_item,
                })
            })
        })
    }
}

/// Application directory: `SPECROUTE_APP_DIR` when set, else the current
/// working directory.
pub fn app_dir_from_env() -> PathBuf {
    match std::env::var_os(APP_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn select_base_path(doc: &serde_json::Value) -> String {
    if let Some(servers) = doc.get("servers").and_then(|v| v.as_array()) {
        let last_url = servers
            .iter()
            .filter_map(|s| s.get("url").and_then(|u| u.as_str()))
            .last();
        if let Some(url) = last_url {
            return server_path(url);
        }
    }
    doc.get("basePath")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Path component of a server URL, exactly as written. `http://host` has no
/// path and yields an empty string rather than `/`. Server variables such as
/// `{basePath}` and dot segments are kept verbatim.
fn server_path(raw: &str) -> String {
    let text = strip_query_and_fragment(raw);
    match url::Url::parse(raw) {
        Ok(_) => path_after_authority(text).to_string(),
        Err(e) if text.contains("://") => {
            tracing::debug!(url = raw, error = %e, "server url is templated; using its literal path");
            path_after_authority(text).to_string()
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => text.to_string(),
        Err(e) => {
            tracing::warn!(url = raw, error = %e, "ignoring unparseable server url");
            String::new()
        }
    }
}

fn path_after_authority(text: &str) -> &str {
    match text.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
        None => text.split_once(':').map(|(_, rest)| rest).unwrap_or(text),
    }
}

fn strip_query_and_fragment(raw: &str) -> &str {
    match raw.find(['?', '#']) {
        Some(i) => &raw[..i],
        None => raw,
    }
}
