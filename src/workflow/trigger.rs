//! Workflow trigger events

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Activity types filter shared by most events
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ActivityTypes {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl ActivityTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Filters for `push` events
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PushOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches_ignore: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths_ignore: Vec<String>,
}

impl PushOptions {
    /// Push filter matching the given branches only
    pub fn branches<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: branches.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Filters for `pull_request` and `pull_request_target` events
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PullRequestOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
}

/// Filters for `workflow_run` events
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct WorkflowRunOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workflows: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
}

/// One POSIX cron entry of a `schedule` trigger
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CronSchedule {
    pub cron: String,
}

impl CronSchedule {
    pub fn new(cron: impl Into<String>) -> Self {
        Self { cron: cron.into() }
    }
}

/// Payload for events that take no options; serializes as `{}`
#[derive(serde::Serialize)]
struct NoOptions {}

/// An event that starts a workflow, with its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    CheckRun(ActivityTypes),
    CheckSuite(ActivityTypes),
    Create,
    Delete,
    Deployment,
    DeploymentStatus,
    Fork,
    Gollum,
    IssueComment(ActivityTypes),
    Issues(ActivityTypes),
    Label(ActivityTypes),
    Milestone(ActivityTypes),
    PageBuild,
    Project(ActivityTypes),
    ProjectCard(ActivityTypes),
    ProjectColumn(ActivityTypes),
    Public,
    PullRequest(PullRequestOptions),
    PullRequestReview(ActivityTypes),
    PullRequestReviewComment(ActivityTypes),
    PullRequestTarget(PullRequestOptions),
    Push(PushOptions),
    RegistryPackage(ActivityTypes),
    Release(ActivityTypes),
    RepositoryDispatch(ActivityTypes),
    Schedule(Vec<CronSchedule>),
    Status,
    Watch(ActivityTypes),
    WorkflowDispatch,
    WorkflowRun(WorkflowRunOptions),
}

impl Trigger {
    /// Event name as written under `on:`
    pub fn event(&self) -> &'static str {
        match self {
            Trigger::CheckRun(_) => "check_run",
            Trigger::CheckSuite(_) => "check_suite",
            Trigger::Create => "create",
            Trigger::Delete => "delete",
            Trigger::Deployment => "deployment",
            Trigger::DeploymentStatus => "deployment_status",
            Trigger::Fork => "fork",
            Trigger::Gollum => "gollum",
            Trigger::IssueComment(_) => "issue_comment",
            Trigger::Issues(_) => "issues",
            Trigger::Label(_) => "label",
            Trigger::Milestone(_) => "milestone",
            Trigger::PageBuild => "page_build",
            Trigger::Project(_) => "project",
            Trigger::ProjectCard(_) => "project_card",
            Trigger::ProjectColumn(_) => "project_column",
            Trigger::Public => "public",
            Trigger::PullRequest(_) => "pull_request",
            Trigger::PullRequestReview(_) => "pull_request_review",
            Trigger::PullRequestReviewComment(_) => "pull_request_review_comment",
            Trigger::PullRequestTarget(_) => "pull_request_target",
            Trigger::Push(_) => "push",
            Trigger::RegistryPackage(_) => "registry_package",
            Trigger::Release(_) => "release",
            Trigger::RepositoryDispatch(_) => "repository_dispatch",
            Trigger::Schedule(_) => "schedule",
            Trigger::Status => "status",
            Trigger::Watch(_) => "watch",
            Trigger::WorkflowDispatch => "workflow_dispatch",
            Trigger::WorkflowRun(_) => "workflow_run",
        }
    }
}

impl Serialize for Trigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Trigger::CheckRun(o)
            | Trigger::CheckSuite(o)
            | Trigger::IssueComment(o)
            | Trigger::Issues(o)
            | Trigger::Label(o)
            | Trigger::Milestone(o)
            | Trigger::Project(o)
            | Trigger::ProjectCard(o)
            | Trigger::ProjectColumn(o)
            | Trigger::PullRequestReview(o)
            | Trigger::PullRequestReviewComment(o)
            | Trigger::RegistryPackage(o)
            | Trigger::Release(o)
            | Trigger::RepositoryDispatch(o)
            | Trigger::Watch(o) => o.serialize(serializer),
            Trigger::PullRequest(o) | Trigger::PullRequestTarget(o) => o.serialize(serializer),
            Trigger::Push(o) => o.serialize(serializer),
            Trigger::Schedule(entries) => entries.serialize(serializer),
            Trigger::WorkflowRun(o) => o.serialize(serializer),
            Trigger::Create
            | Trigger::Delete
            | Trigger::Deployment
            | Trigger::DeploymentStatus
            | Trigger::Fork
            | Trigger::Gollum
            | Trigger::PageBuild
            | Trigger::Public
            | Trigger::Status
            | Trigger::WorkflowDispatch => NoOptions {}.serialize(serializer),
        }
    }
}

/// The set of events a workflow reacts to
///
/// Holds at most one trigger per event kind. Nothing is implied: an empty set
/// is omitted from the serialized workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triggers {
    events: BTreeMap<&'static str, Trigger>,
}

impl Triggers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger, replacing any trigger of the same kind
    pub fn with(mut self, trigger: Trigger) -> Self {
        self.insert(trigger);
        self
    }

    /// Insert a trigger, returning the one it replaced
    pub fn insert(&mut self, trigger: Trigger) -> Option<Trigger> {
        self.events.insert(trigger.event(), trigger)
    }

    /// Look up a trigger by event name
    pub fn get(&self, event: &str) -> Option<&Trigger> {
        self.events.get(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl FromIterator<Trigger> for Triggers {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        let mut triggers = Triggers::new();
        for trigger in iter {
            triggers.insert(trigger);
        }
        triggers
    }
}

impl Serialize for Triggers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.events.iter())
    }
}
