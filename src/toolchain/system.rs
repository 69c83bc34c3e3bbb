//! Toolchain backed by real subprocesses

use crate::toolchain::{CommandOutput, Invocation, Toolchain, ToolchainError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands as child processes of the project directory
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    /// Working directory for every command
    dir: PathBuf,
}

impl SystemToolchain {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl Toolchain for SystemToolchain {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ToolchainError> {
        let command = invocation.to_string();
        debug!("Spawning `{}` in {}", command, self.dir.display());

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ToolchainError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            warn!("`{}` exited with code {}", command, code);
            return Err(ToolchainError::Failed {
                command,
                code,
                stdout,
                stderr,
            });
        }

        debug!("`{}` returned {} bytes of output", command, stdout.len());

        Ok(CommandOutput { stdout, stderr })
    }
}
