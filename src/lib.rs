//! gojen - scaffold Go projects and generate their GitHub Actions workflows

pub mod cli;
pub mod project;
pub mod toolchain;
pub mod workflow;

// Re-export commonly used types
pub use project::{generate_workflows, GeneratedWorkflow, ProjectConfig, ProjectError, ProjectSetup, SetupOptions};
pub use toolchain::{CommandOutput, Invocation, SystemToolchain, Toolchain, ToolchainError};
pub use workflow::{Job, Step, Trigger, Triggers, Workflow, WorkflowError};
