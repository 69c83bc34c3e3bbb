//! Project configuration from `gojen.json`

use crate::project::ProjectError;
use crate::workflow::Step;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the project configuration
pub const CONFIG_FILE: &str = "gojen.json";

pub const DEFAULT_GO_VERSION: &str = "1.16";
pub const DEFAULT_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const DEFAULT_RELEASE_BRANCH: &str = "master";
pub const DEFAULT_GOJEN_VERSION: &str = "latest";

/// Coverage profile written by `go test` and uploaded by the build workflow
pub const COVERAGE_FILE: &str = "coverage.txt";

/// Project configuration
///
/// Every field is optional so an unset value can be told apart from one set
/// to its zero value. Code reads the configuration through the accessor
/// methods, which apply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Go module path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gojen_version: Option<String>,
    /// SPDX identifier of the license to write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_workflow: Option<bool>,
    /// Name of the repository secret holding the API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_release_branch: Option<String>,
    /// The project is gojen itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_gojen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_cov: Option<bool>,
    /// `KEY=VALUE` entries exported to `go test`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_env_vars: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitignore: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_owners: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_vendor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tidy: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_linter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_test_args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_build: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_build_args: Option<Vec<String>>,
    /// Environment passed to the gojen step of generated workflows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_env: Option<BTreeMap<String, String>>,
    /// Steps inserted right after the Go setup step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend_steps: Option<Vec<Step>>,
    /// Steps added after the change detection step
    #[serde(default, alias = "apendSteps", skip_serializing_if = "Option::is_none")]
    pub append_steps: Option<Vec<Step>>,
}

impl ProjectConfig {
    /// Path of the config file inside a project directory
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Load and validate the config of the project in `dir`
    pub fn load(dir: &Path) -> Result<Self, ProjectError> {
        let path = Self::path_in(dir);
        if !path.exists() {
            return Err(ProjectError::ConfigNotFound(path));
        }
        Self::from_file(path)
    }

    /// Load project configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse project configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let config: ProjectConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields every project needs
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.name().is_empty() {
            return Err(ProjectError::MissingField("name"));
        }
        if self.repository().is_empty() {
            return Err(ProjectError::MissingField("repository"));
        }
        Ok(())
    }

    /// Write the configuration as pretty JSON into `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ProjectError> {
        let path = Self::path_in(dir);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn repository(&self) -> &str {
        self.repository.as_deref().unwrap_or_default()
    }

    pub fn go_version(&self) -> &str {
        self.go_version.as_deref().unwrap_or(DEFAULT_GO_VERSION)
    }

    pub fn author_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or_default()
    }

    pub fn author_email(&self) -> &str {
        self.author_email.as_deref().unwrap_or_default()
    }

    pub fn author_organization(&self) -> &str {
        self.author_organization.as_deref().unwrap_or_default()
    }

    pub fn create_readme(&self) -> bool {
        self.readme.unwrap_or(true)
    }

    pub fn gojen_version(&self) -> &str {
        self.gojen_version.as_deref().unwrap_or(DEFAULT_GOJEN_VERSION)
    }

    pub fn license(&self) -> &str {
        self.license.as_deref().unwrap_or_default()
    }

    pub fn is_release(&self) -> bool {
        self.release.unwrap_or(false)
    }

    pub fn is_build_workflow(&self) -> bool {
        self.build_workflow.unwrap_or(false)
    }

    pub fn github_token(&self) -> &str {
        self.github_token.as_deref().unwrap_or(DEFAULT_GITHUB_TOKEN)
    }

    pub fn default_release_branch(&self) -> &str {
        self.default_release_branch
            .as_deref()
            .unwrap_or(DEFAULT_RELEASE_BRANCH)
    }

    pub fn is_gojen(&self) -> bool {
        self.is_gojen.unwrap_or(false)
    }

    pub fn is_code_cov(&self) -> bool {
        self.code_cov.unwrap_or(false)
    }

    pub fn test_env_vars(&self) -> &[String] {
        self.test_env_vars.as_deref().unwrap_or_default()
    }

    pub fn gitignore(&self) -> &[String] {
        self.gitignore.as_deref().unwrap_or_default()
    }

    pub fn code_owners(&self) -> &[String] {
        self.code_owners.as_deref().unwrap_or_default()
    }

    pub fn skip_vendor(&self) -> bool {
        self.skip_vendor.unwrap_or(false)
    }

    pub fn skip_tidy(&self) -> bool {
        self.skip_tidy.unwrap_or(false)
    }

    pub fn is_go_linter(&self) -> bool {
        self.go_linter.unwrap_or(false)
    }

    pub fn is_go_test(&self) -> bool {
        self.go_test.unwrap_or(true)
    }

    pub fn go_test_args(&self) -> &[String] {
        self.go_test_args.as_deref().unwrap_or_default()
    }

    pub fn is_go_build(&self) -> bool {
        self.go_build.unwrap_or(true)
    }

    pub fn go_build_args(&self) -> &[String] {
        self.go_build_args.as_deref().unwrap_or_default()
    }

    pub fn workflow_env(&self) -> BTreeMap<String, String> {
        self.workflow_env.clone().unwrap_or_default()
    }

    pub fn prepend_steps(&self) -> &[Step] {
        self.prepend_steps.as_deref().unwrap_or_default()
    }

    pub fn append_steps(&self) -> &[Step] {
        self.append_steps.as_deref().unwrap_or_default()
    }

    /// Lines of the generated `.gitignore`
    ///
    /// Configured entries, then the coverage profile when coverage is on, then
    /// the binary named after the project.
    pub fn gitignore_entries(&self) -> Vec<String> {
        let mut entries = self.gitignore().to_vec();
        if self.is_code_cov() {
            entries.push(COVERAGE_FILE.to_string());
        }
        entries.push(self.name().to_string());
        entries
    }

    /// Arguments for `go test`, coverage flags first
    pub fn go_test_command_args(&self) -> Vec<String> {
        let mut args = vec!["test".to_string()];
        if self.is_code_cov() {
            args.push(format!("-coverprofile={}", COVERAGE_FILE));
            args.push("-covermode=atomic".to_string());
        }
        args.extend(non_blank(self.go_test_args()));
        args
    }

    /// Arguments for `go build`
    pub fn go_build_command_args(&self) -> Vec<String> {
        let mut args = vec!["build".to_string()];
        args.extend(non_blank(self.go_build_args()));
        args
    }

    /// Environment for `go test`, parsed from `KEY=VALUE` entries
    ///
    /// Entries without `=` are ignored.
    pub fn test_env(&self) -> Vec<(String, String)> {
        self.test_env_vars()
            .iter()
            .filter_map(|entry| entry.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.to_string()))
            .filter(|(k, _)| !k.is_empty())
            .collect()
    }

    /// Name used as copyright holder in license texts
    pub fn copyright_holder(&self) -> &str {
        [self.author_name(), self.author_organization(), self.name()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }
}

fn non_blank(args: &[String]) -> impl Iterator<Item = String> + '_ {
    args.iter().filter(|a| !a.trim().is_empty()).cloned()
}
