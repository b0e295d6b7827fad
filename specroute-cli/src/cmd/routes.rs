use specroute_core::Contract;
use specroute_router::plan_routes;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ContractArgs, OutputArgs};

pub fn routes_cmd(contract_args: &ContractArgs, output: OutputArgs) -> i32 {
    let app_dir = contract_args.app_dir();
    let contract = match Contract::load(contract_args.source(), &app_dir) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to load contract: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let plan = plan_routes(&contract, &app_dir);

    if output.format == OutputFormat::Text && !output.quiet {
        if !plan.base_path.is_empty() {
            println!("base path: {}", plan.base_path);
        }
        for route in &plan.routes {
            let dest = &route.destination;
            println!(
                "{} {} -> {}.{}",
                route.method,
                route.path,
                dest.qualified_class(),
                dest.responder
            );
        }
        if !plan.skipped.is_empty() {
            println!();
            println!("Not routed:");
            for op in &plan.skipped {
                println!("  {} {}", op.method, op.path);
            }
        }
    } else {
        print_result(output.format, output.quiet, &plan);
    }

    exit_codes::SUCCESS
}
