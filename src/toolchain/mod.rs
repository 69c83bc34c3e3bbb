//! External toolchain commands (go, golangci-lint)

pub mod system;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub use system::SystemToolchain;

/// Error types for toolchain invocations
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}")]
    Failed {
        command: String,
        code: i32,
        /// Captured output; `go test` and linters report failures on stdout
        stdout: String,
        stderr: String,
    },
}

/// A command line to run in the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment variables
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(env);
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Trait for running toolchain commands - allows swapping the real processes out in tests
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Run a command to completion; a non-zero exit is an error
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ToolchainError>;
}
