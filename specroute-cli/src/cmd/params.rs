use serde::Serialize;
use specroute_core::{OpenApiValidator, ParamLocation};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ContractArgs, OutputArgs};

#[derive(Serialize)]
struct ParamRow {
    name: String,
    location: ParamLocation,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Serialize)]
struct OperationRow {
    uri: String,
    method: String,
    params: Vec<ParamRow>,
}

pub fn params_cmd(contract_args: &ContractArgs, output: OutputArgs) -> i32 {
    let validator = match OpenApiValidator::new(contract_args.source(), &contract_args.app_dir()) {
        Ok(v) => v,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to build validator: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let mut operations: Vec<OperationRow> = validator
        .templates()
        .map(|(uri, method, params)| OperationRow {
            uri: uri.to_string(),
            method: method.to_uppercase(),
            params: params
                .iter()
                .map(|p| ParamRow {
                    name: p.name.clone(),
                    location: p.location,
                    required: p.required,
                    r#type: p.schema.type_name.clone(),
                    format: p.schema.format.clone(),
                })
                .collect(),
        })
        .collect();
    operations.sort_by(|a, b| (&a.uri, &a.method).cmp(&(&b.uri, &b.method)));

    if output.format == OutputFormat::Text && !output.quiet {
        for op in &operations {
            println!("{} {}", op.method, op.uri);
            for p in &op.params {
                let ty = match (&p.r#type, &p.format) {
                    (Some(t), Some(f)) => format!("{t} ({f})"),
                    (Some(t), None) => t.clone(),
                    (None, _) => "any".to_string(),
                };
                let required = if p.required { ", required" } else { "" };
                println!("  {} in {}: {ty}{required}", p.name, p.location);
            }
        }
    } else {
        print_result(output.format, output.quiet, &operations);
    }

    exit_codes::SUCCESS
}
