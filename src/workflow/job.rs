//! Job model

use crate::workflow::step::Step;
use serde::Serialize;
use std::collections::BTreeMap;

/// A job definition inside a workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
    /// Name displayed by the runner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Runner label, e.g. `ubuntu-latest`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs_on: Option<String>,

    /// Jobs that must succeed before this one starts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,

    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<JobPermissions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<JobDefaults>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<JobStrategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerOptions>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, ContainerOptions>,

    /// Output name to expression, available to dependent jobs
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_minutes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_on_error: Option<bool>,

    /// Ordered steps
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

impl Job {
    /// Create a job with a display name and runner label
    pub fn new(name: impl Into<String>, runs_on: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            runs_on: Some(runs_on.into()),
            ..Default::default()
        }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Declare the jobs this one depends on
    pub fn needs<I, S>(mut self, jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.needs = jobs.into_iter().map(Into::into).collect();
        self
    }

    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_permissions(mut self, permissions: JobPermissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_strategy(mut self, strategy: JobStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

/// Access level for a permission scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPermission {
    Read,
    Write,
    None,
}

/// Token permissions granted to a job
///
/// Scopes left as `None` are omitted; the runner then treats them as `none`
/// once any scope is specified.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobPermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployments: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_requests: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_projects: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_events: Option<JobPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<JobPermission>,
}

/// Defaults applied to every `run` step of a job
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
}

/// Build matrix strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<JobMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<u32>,
}

/// Matrix dimensions plus explicit include/exclude combinations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobMatrix {
    /// Dimension name to values, e.g. `os: [ubuntu-latest, macos-latest]`
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<BTreeMap<String, String>>,
}

impl JobMatrix {
    pub fn dimension<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }
}

/// Container a job (or service) runs in
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<ContainerCredentials>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    /// Extra `docker create` flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
