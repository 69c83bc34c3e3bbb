//! CLI command definitions

use crate::project::config::{DEFAULT_GO_VERSION, DEFAULT_RELEASE_BRANCH};
use crate::project::ProjectConfig;
use clap::{ArgAction, Args};

/// Create a gojen.json from flags and set the project up
#[derive(Debug, Args, Clone)]
pub struct NewCommand {
    /// Name of the project
    #[arg(long)]
    pub name: String,

    /// Description of the project
    #[arg(long)]
    pub description: Option<String>,

    /// Module path, e.g. github.com/user/project
    #[arg(long)]
    pub repository: String,

    /// Go version used in workflows
    #[arg(long, default_value = DEFAULT_GO_VERSION)]
    pub go_version: String,

    #[arg(long)]
    pub author_name: Option<String>,

    #[arg(long)]
    pub author_email: Option<String>,

    /// Author GitHub organization
    #[arg(long)]
    pub author_organization: Option<String>,

    /// SPDX identifier of the license to add
    #[arg(long)]
    pub license: Option<String>,

    /// Set up semantic release and binary uploads
    #[arg(long)]
    pub release: bool,

    /// Default branch to release from
    #[arg(long, default_value = DEFAULT_RELEASE_BRANCH)]
    pub default_release_branch: String,

    /// Generate the pull request build workflow
    #[arg(long)]
    pub build_workflow: bool,

    /// Entries for .gitignore
    #[arg(long, value_delimiter = ',')]
    pub gitignore: Vec<String>,

    /// Entries for CODEOWNERS
    #[arg(long, value_delimiter = ',')]
    pub code_owners: Vec<String>,

    /// Run golangci-lint
    #[arg(long)]
    pub go_linter: bool,

    /// Run go test
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub go_test: bool,

    /// Arguments for go test
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub go_test_args: Vec<String>,
}

impl NewCommand {
    /// Project configuration described by the flags
    pub fn to_config(&self) -> ProjectConfig {
        ProjectConfig {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            repository: Some(self.repository.clone()),
            go_version: Some(self.go_version.clone()),
            author_name: self.author_name.clone(),
            author_email: self.author_email.clone(),
            author_organization: self.author_organization.clone(),
            license: self.license.clone(),
            release: Some(self.release),
            default_release_branch: Some(self.default_release_branch.clone()),
            build_workflow: Some(self.build_workflow),
            gitignore: Some(self.gitignore.clone()),
            code_owners: Some(self.code_owners.clone()),
            go_linter: Some(self.go_linter),
            go_test: Some(self.go_test),
            go_test_args: Some(self.go_test_args.clone()),
            ..Default::default()
        }
    }
}
