#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod request;
pub mod schema;
pub mod validate;
pub mod value;

pub use crate::contract::{Contract, ContractSource, DocumentFormat, ParamLocation};
pub use crate::error::{ConfigError, LoadError, SchemaError, ValidationError};
pub use crate::request::RequestContext;
pub use crate::schema::{AdditionalProperties, Pattern, Schema};
pub use crate::validate::{OpenApiValidator, OperationParams, ParameterSpec, ValidatedParams};
pub use crate::value::{Numeric, ParamValue};
