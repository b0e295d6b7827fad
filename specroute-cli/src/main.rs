use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "specroute", version, about = "OpenAPI route resolver and parameter checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let exit_code = run_command(cli.command);
    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(command: Command) -> i32 {
    match command {
        Command::Routes { contract, output } => cmd::routes::routes_cmd(&contract, output),
        Command::Params { contract, output } => cmd::params::params_cmd(&contract, output),
        Command::Check {
            contract,
            method,
            uri,
            query,
            path_params,
            headers,
            cookies,
            output,
        } => cmd::check::check_cmd(
            &contract,
            &method,
            &uri,
            query.as_deref(),
            &path_params,
            &headers,
            &cookies,
            output,
        ),
    }
}
