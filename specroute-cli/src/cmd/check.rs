use serde::Serialize;
use serde_json::{Map, Value};
use specroute_core::{OpenApiValidator, ParamLocation, ParamValue, RequestContext};

use crate::exit_codes;
use crate::output::{json_or_string, parse_assignment, print_error, print_result, OutputFormat};
use crate::{ContractArgs, OutputArgs};

#[derive(Serialize)]
struct CheckedParam {
    name: String,
    location: ParamLocation,
    value: ParamValue,
}

#[derive(Serialize)]
struct CheckFailure {
    kind: &'static str,
    parameter: String,
    message: String,
}

#[derive(Serialize)]
struct CheckResult {
    valid: bool,
    method: String,
    uri: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    params: Vec<CheckedParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CheckFailure>,
}

#[allow(clippy::too_many_arguments)]
pub fn check_cmd(
    contract_args: &ContractArgs,
    method: &str,
    uri: &str,
    query: Option<&str>,
    path_params: &[String],
    headers: &[String],
    cookies: &[String],
    output: OutputArgs,
) -> i32 {
    let validator = match OpenApiValidator::new(contract_args.source(), &contract_args.app_dir()) {
        Ok(v) => v,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to build validator: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let req = match build_request(method, uri, query, path_params, headers, cookies) {
        Ok(r) => r,
        Err(message) => {
            print_error(output.format, output.quiet, &message);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if validator.operation(uri, method).is_none() {
        tracing::warn!(method, uri, "no parameters declared for this operation");
    }

    let mut result = CheckResult {
        valid: true,
        method: method.to_uppercase(),
        uri: uri.to_string(),
        params: Vec::new(),
        error: None,
    };

    match validator.process_resource(&req) {
        Ok(validated) => {
            result.params = validated
                .iter()
                .map(|p| CheckedParam {
                    name: p.name.clone(),
                    location: p.location,
                    value: p.value.clone(),
                })
                .collect();
        }
        Err(err) => {
            result.valid = false;
            result.error = Some(CheckFailure {
                kind: err.kind(),
                parameter: err.parameter().to_string(),
                message: err.to_string(),
            });
        }
    }

    if output.format == OutputFormat::Text && !output.quiet {
        match &result.error {
            None => {
                println!("ok: {} {}", result.method, result.uri);
                for p in &result.params {
                    let value = serde_json::to_string(&p.value).unwrap_or_default();
                    println!("  {} ({}) = {value}", p.name, p.location);
                }
            }
            Some(failure) => {
                eprintln!("error: validation failed");
                eprintln!("- {}: {}", failure.parameter, failure.message);
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}

fn build_request(
    method: &str,
    uri: &str,
    query: Option<&str>,
    path_params: &[String],
    headers: &[String],
    cookies: &[String],
) -> Result<RequestContext, String> {
    let mut req = RequestContext::new(method, uri);
    if let Some(qs) = query {
        req.query = parse_query(qs)?;
    }
    req.path_params = parse_assignments(path_params)?;
    req.headers = parse_assignments(headers)?;
    req.cookies = parse_assignments(cookies)?;
    Ok(req)
}

fn parse_assignments(raw: &[String]) -> Result<Map<String, Value>, String> {
    raw.iter().map(|r| parse_assignment(r)).collect()
}

/// Percent-decodes a query string. Repeated keys collect into an array.
fn parse_query(qs: &str) -> Result<Map<String, Value>, String> {
    let mut out = Map::new();
    for pair in qs.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(key)?;
        let value = json_or_string(&decode(value)?);
        match out.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                out.insert(key, value);
            }
        }
    }
    Ok(out)
}

fn decode(raw: &str) -> Result<String, String> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|s| s.into_owned())
        .map_err(|e| format!("invalid percent-encoding in `{raw}`: {e}"))
}
