pub mod rules;

use std::collections::HashMap;
use std::path::Path;

use crate::contract::{param_location, Contract, ContractSource, ParamLocation};
use crate::error::{ConfigError, SchemaError, ValidationError};
use crate::request::RequestContext;
use crate::schema::{compile_at, Schema};
use crate::value::ParamValue;

pub use rules::validate_param;

/// One compiled parameter of an operation.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub schema: Schema,
}

/// Compiled parameters of one `(uri, method)` pair, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct OperationParams {
    params: Vec<ParameterSpec>,
}

impl OperationParams {
    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.params.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParam {
    pub name: String,
    pub location: ParamLocation,
    pub value: ParamValue,
}

/// Normalized values of the parameters present on a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedParams {
    values: Vec<ValidatedParam>,
}

impl ValidatedParams {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    pub fn get_in(&self, location: ParamLocation, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|p| p.location == location && p.name == name)
            .map(|p| &p.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidatedParam> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validates request parameters against the contract's parameter schemas.
///
/// Everything is compiled in the constructor; [`process_resource`] only
/// reads, so one validator can serve many threads.
///
/// [`process_resource`]: OpenApiValidator::process_resource
#[derive(Debug, Clone)]
pub struct OpenApiValidator {
    base_path: String,
    operations: HashMap<String, HashMap<String, OperationParams>>,
}

impl OpenApiValidator {
    pub fn new(source: ContractSource, app_dir: &Path) -> Result<Self, ConfigError> {
        let contract = Contract::load(source, app_dir)?;
        Ok(Self::from_contract(&contract)?)
    }

    pub fn from_contract(contract: &Contract) -> Result<Self, SchemaError> {
        let mut operations: HashMap<String, HashMap<String, OperationParams>> = HashMap::new();
        let mut compiled = 0usize;

        for op in contract.operations() {
            let mut params = Vec::new();
            for (i, raw) in op.parameters().into_iter().enumerate() {
                let Some(name) = raw.get("name").and_then(|v| v.as_str()) else {
                    tracing::warn!(uri = op.template, method = op.method, index = i, "ignoring parameter without a name");
                    continue;
                };
                let location = param_location(raw);
                let required = location == ParamLocation::Path
                    || raw.get("required").and_then(|v| v.as_bool()).unwrap_or(false);
                let pointer = format!("{} {} {name}", op.method, op.template);
                params.push(ParameterSpec {
                    name: name.to_string(),
                    location,
                    required,
                    schema: compile_param_schema(raw, &pointer)?,
                });
            }
            if params.is_empty() {
                continue;
            }
            compiled += params.len();
            operations
                .entry(op.template.to_string())
                .or_default()
                .insert(op.method.to_string(), OperationParams { params });
        }

        tracing::info!(
            operations = operations.values().map(|m| m.len()).sum::<usize>(),
            parameters = compiled,
            "compiled parameter rules"
        );

        Ok(Self {
            base_path: contract.base_path().to_string(),
            operations,
        })
    }

    /// Compiled parameters for a template and method. The template may be
    /// given with or without the contract's base path.
    pub fn operation(&self, uri_template: &str, method: &str) -> Option<&OperationParams> {
        let method = method.to_ascii_lowercase();
        let by_method = self.operations.get(uri_template).or_else(|| {
            if self.base_path.is_empty() {
                return None;
            }
            uri_template
                .strip_prefix(self.base_path.as_str())
                .and_then(|rest| self.operations.get(rest))
        })?;
        by_method.get(&method)
    }

    /// Validates the request's parameters, stopping at the first failure.
    /// A request whose template and method declare no parameters passes.
    pub fn process_resource(&self, req: &RequestContext) -> Result<ValidatedParams, ValidationError> {
        let Some(op) = self.operation(&req.uri_template, &req.method) else {
            return Ok(ValidatedParams::default());
        };

        let mut out = ValidatedParams::default();
        for spec in op.iter() {
            let Some(raw) = req.param(spec.location, &spec.name) else {
                if spec.required {
                    return Err(ValidationError::MissingParameter {
                        name: spec.name.clone(),
                        location: spec.location,
                    });
                }
                continue;
            };
            let value = validate_param(raw, &spec.schema, &spec.name)?;
            out.values.push(ValidatedParam {
                name: spec.name.clone(),
                location: spec.location,
                value,
            });
        }
        Ok(out)
    }

    pub fn templates(&self) -> impl Iterator<Item = (&str, &str, &OperationParams)> {
        self.operations.iter().flat_map(|(uri, methods)| {
            methods
                .iter()
                .map(move |(method, params)| (uri.as_str(), method.as_str(), params))
        })
    }
}

/// OpenAPI 3 parameters carry their constraints under `schema`; Swagger 2
/// style parameters carry them inline. A `schema` without a `type` inherits
/// the parameter-level one.
fn compile_param_schema(raw: &serde_json::Value, pointer: &str) -> Result<Schema, SchemaError> {
    match raw.get("schema") {
        Some(schema_raw) if schema_raw.is_object() => {
            let mut schema = compile_at(schema_raw, &format!("{pointer}/schema"))?;
            if schema.type_name.is_none() {
                schema.type_name = raw.get("type").and_then(|v| v.as_str()).map(|s| s.to_string());
            }
            Ok(schema)
        }
        _ => compile_at(raw, pointer),
    }
}
