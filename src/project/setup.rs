//! Project setup sequence
//!
//! Writes the project files, then runs the Go toolchain one command at a
//! time. The first failure stops the sequence.

use crate::cli::output::{log_fail, log_info, log_success};
use crate::project::config::ProjectConfig;
use crate::project::files::{self, WriteOutcome};
use crate::project::workflows::generate_workflows;
use crate::project::ProjectError;
use crate::toolchain::{Invocation, Toolchain, ToolchainError};
use chrono::Datelike;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Phase of the setup, shown in progress lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Lint,
    Test,
    Build,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Setup => "Setup",
            Stage::Lint => "Lint",
            Stage::Test => "Test",
            Stage::Build => "Build",
        };
        f.write_str(name)
    }
}

/// Switches that do not belong in the project config
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupOptions {
    /// Running inside a CI workflow; the linter runs as its own job there
    pub ci: bool,
}

/// Sets up the project in `dir` from its configuration
pub struct ProjectSetup<'a, T: Toolchain + ?Sized> {
    dir: &'a Path,
    config: &'a ProjectConfig,
    toolchain: &'a T,
    options: SetupOptions,
}

impl<'a, T: Toolchain + ?Sized> ProjectSetup<'a, T> {
    pub fn new(
        dir: &'a Path,
        config: &'a ProjectConfig,
        toolchain: &'a T,
        options: SetupOptions,
    ) -> Self {
        Self {
            dir,
            config,
            toolchain,
            options,
        }
    }

    /// Run the whole sequence, writing progress lines to `out`
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<(), ProjectError> {
        info!("Setting up project {} in {}", self.config.name(), self.dir.display());
        self.write_files(out)?;
        self.run_toolchain(out).await
    }

    /// Write license, readme, code owners, workflows, gitignore and main.go
    pub fn write_files<W: Write>(&self, out: &mut W) -> Result<(), ProjectError> {
        let (dir, config) = (self.dir, self.config);

        let year = chrono::Utc::now().year();
        if let WriteOutcome::Written(_) = files::write_license(dir, config, year)? {
            log_info(out, Stage::Setup, "added license")?;
        }

        if config.create_readme() {
            files::write_readme(dir, config)?;
        }

        files::write_code_owners(dir, config)?;

        // Serialize everything before the first workflow file is touched
        let workflows = generate_workflows(config)?;
        for path in files::write_workflows(dir, &workflows)? {
            log_info(out, Stage::Setup, &format!("wrote {}", display_relative(dir, &path)))?;
        }

        files::write_gitignore(dir, config)?;
        files::write_main_go(dir)?;

        Ok(())
    }

    /// Run the Go toolchain commands the configuration enables
    pub async fn run_toolchain<W: Write>(&self, out: &mut W) -> Result<(), ProjectError> {
        let config = self.config;

        if !self.dir.join("go.mod").exists() {
            let init = Invocation::new("go", ["mod", "init", config.repository()]);
            self.run_stage(out, Stage::Setup, init, None).await?;
        }

        if !config.skip_vendor() {
            self.run_stage(out, Stage::Setup, Invocation::new("go", ["mod", "vendor"]), None)
                .await?;
        }

        if !config.skip_tidy() {
            self.run_stage(out, Stage::Setup, Invocation::new("go", ["mod", "tidy"]), None)
                .await?;
        }

        self.run_stage(out, Stage::Setup, Invocation::new("go", ["fmt"]), None)
            .await?;

        if !self.options.ci && config.is_go_linter() {
            let lint = Invocation::new("golangci-lint", ["run"]);
            self.run_stage(out, Stage::Lint, lint, Some("go linter passed"))
                .await?;
        }

        if config.is_go_test() {
            let test = Invocation::new("go", config.go_test_command_args())
                .with_env(config.test_env());
            self.run_stage(out, Stage::Test, test, Some("go test passed"))
                .await?;
        }

        if config.is_go_build() {
            let build = Invocation::new("go", config.go_build_command_args());
            self.run_stage(out, Stage::Build, build, Some("go build passed"))
                .await?;
        }

        Ok(())
    }

    async fn run_stage<W: Write>(
        &self,
        out: &mut W,
        stage: Stage,
        invocation: Invocation,
        passed: Option<&str>,
    ) -> Result<(), ProjectError> {
        log_info(out, stage, &format!("running {}", invocation))?;

        match self.toolchain.run(&invocation).await {
            Ok(output) => {
                forward(out, &output.stdout)?;
                if let Some(message) = passed {
                    log_success(out, stage, message)?;
                }
                Ok(())
            }
            Err(e) => {
                if let ToolchainError::Failed { stdout, stderr, .. } = &e {
                    forward(out, stdout)?;
                    forward(out, stderr)?;
                }
                log_fail(out, stage, &format!("running {} failed", invocation))?;
                Err(e.into())
            }
        }
    }
}

/// Copy captured command output to `out`, ending it with a newline
fn forward<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn display_relative(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir).unwrap_or(path).display().to_string()
}
