use std::path::PathBuf;

use clap::Args;
use specroute_core::contract::app_dir_from_env;
use specroute_core::ContractSource;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ContractArgs {
    /// Contract file; discovered in the application directory when omitted.
    pub spec: Option<PathBuf>,
    /// Application directory (defaults to SPECROUTE_APP_DIR, then the cwd).
    #[arg(long)]
    pub app_dir: Option<PathBuf>,
}

impl ContractArgs {
    pub fn app_dir(&self) -> PathBuf {
        self.app_dir.clone().unwrap_or_else(app_dir_from_env)
    }

    pub fn source(&self) -> ContractSource {
        match &self.spec {
            Some(path) => ContractSource::File(path.clone()),
            None => ContractSource::Discover,
        }
    }
}
