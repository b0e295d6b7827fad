use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the route each operation resolves to.
    Routes {
        #[command(flatten)]
        contract: ContractArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the compiled parameters of every operation.
    Params {
        #[command(flatten)]
        contract: ContractArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Validate a synthetic request against the contract.
    Check {
        #[command(flatten)]
        contract: ContractArgs,
        #[arg(long, default_value = "GET")]
        method: String,
        /// URI template as declared in the contract, e.g. `/pets/{id}`.
        #[arg(long)]
        uri: String,
        /// Query string, percent-encoded: `a=1&b=x%20y`.
        #[arg(long)]
        query: Option<String>,
        #[arg(long = "param", value_name = "NAME=VALUE")]
        path_params: Vec<String>,
        #[arg(long = "header", value_name = "NAME=VALUE")]
        headers: Vec<String>,
        #[arg(long = "cookie", value_name = "NAME=VALUE")]
        cookies: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}
