use std::path::PathBuf;

use specroute_core::LoadError;
use thiserror::Error;

/// Construction-time failures. Operations that name no destination are
/// skipped rather than reported here.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("handler module '{module}' is not registered (expected at {})", .location.display())]
    ModuleNotFound { module: String, location: PathBuf },
    #[error("module '{module}' has no resource class '{class}'")]
    ClassNotFound { module: String, class: String },
    #[error("resource '{class}' has no responder '{responder}'")]
    ResponderNotFound { class: String, responder: String },
    #[error("path '{path}' is served by '{existing}' and cannot also be served by '{incoming}'")]
    ConflictingResources {
        path: String,
        existing: String,
        incoming: String,
    },
}
