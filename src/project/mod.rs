//! Project scaffolding: configuration, generated files and the setup sequence

pub mod config;
pub mod files;
pub mod license;
pub mod setup;
pub mod workflows;

pub use config::ProjectConfig;
pub use setup::{ProjectSetup, SetupOptions, Stage};
pub use workflows::{generate_workflows, GeneratedWorkflow};

use crate::toolchain::ToolchainError;
use crate::workflow::WorkflowError;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{0} is missing in config")]
    MissingField(&'static str),

    #[error("{} does not exist, initialise one using `gojen new`", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}
