//! Plain files written into the project directory

use crate::project::config::ProjectConfig;
use crate::project::license;
use crate::project::workflows::{GeneratedWorkflow, WORKFLOWS_DIR};
use crate::project::ProjectError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of writing a file that may already exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// Left alone: the file already exists or there is nothing to write
    Skipped(PathBuf),
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written(_))
    }
}

const MAIN_GO: &str = r#"package main

import (
	"fmt"
)

func main() {
	fmt.Println("project created with gojen, have fun :-)")
}
"#;

/// Write `.gitignore`, replacing any existing file
pub fn write_gitignore(dir: &Path, config: &ProjectConfig) -> Result<PathBuf, ProjectError> {
    let path = dir.join(".gitignore");
    fs::write(&path, config.gitignore_entries().join("\n"))?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Write `.github/CODEOWNERS` when owners are configured
pub fn write_code_owners(dir: &Path, config: &ProjectConfig) -> Result<WriteOutcome, ProjectError> {
    let github_dir = dir.join(".github");
    let path = github_dir.join("CODEOWNERS");

    if config.code_owners().is_empty() {
        return Ok(WriteOutcome::Skipped(path));
    }

    fs::create_dir_all(&github_dir)?;
    fs::write(&path, config.code_owners().join("\n"))?;
    Ok(WriteOutcome::Written(path))
}

/// Write `README.md` unless it exists
pub fn write_readme(dir: &Path, config: &ProjectConfig) -> Result<WriteOutcome, ProjectError> {
    let path = dir.join("README.md");
    if path.exists() {
        return Ok(WriteOutcome::Skipped(path));
    }

    let mut contents = format!("# {}\n\n", config.name());
    if !config.description().is_empty() {
        contents.push_str(config.description());
        contents.push('\n');
    }

    fs::write(&path, contents)?;
    Ok(WriteOutcome::Written(path))
}

/// Write `LICENSE` unless it exists or no known license is configured
pub fn write_license(
    dir: &Path,
    config: &ProjectConfig,
    year: i32,
) -> Result<WriteOutcome, ProjectError> {
    let path = dir.join("LICENSE");
    if config.license().is_empty() || path.exists() {
        return Ok(WriteOutcome::Skipped(path));
    }

    match license::render(config.license(), year, config.copyright_holder()) {
        Some(text) => {
            fs::write(&path, text)?;
            Ok(WriteOutcome::Written(path))
        }
        None => {
            warn!(
                "No license text for '{}' (supported: {})",
                config.license(),
                license::supported().collect::<Vec<_>>().join(", ")
            );
            Ok(WriteOutcome::Skipped(path))
        }
    }
}

/// Write a starter `main.go` unless it exists
pub fn write_main_go(dir: &Path) -> Result<WriteOutcome, ProjectError> {
    let path = dir.join("main.go");
    if path.exists() {
        return Ok(WriteOutcome::Skipped(path));
    }

    fs::write(&path, MAIN_GO)?;
    Ok(WriteOutcome::Written(path))
}

/// Write every generated workflow under `.github/workflows/`
pub fn write_workflows(
    dir: &Path,
    workflows: &[GeneratedWorkflow],
) -> Result<Vec<PathBuf>, ProjectError> {
    if workflows.is_empty() {
        return Ok(Vec::new());
    }

    let workflows_dir = dir.join(WORKFLOWS_DIR);
    fs::create_dir_all(&workflows_dir)?;

    let mut written = Vec::with_capacity(workflows.len());
    for generated in workflows {
        let path = workflows_dir.join(generated.file_name);
        fs::write(&path, &generated.contents)?;
        debug!("Wrote workflow '{}' to {}", generated.workflow.name(), path.display());
        written.push(path);
    }

    Ok(written)
}
