//! GitHub Actions workflow document model
//!
//! A [`Workflow`] holds a name, one [`Triggers`] set and a mapping of job name
//! to [`Job`]. Jobs are always addressed by name: every step mutation looks the
//! job up in the mapping, so a job replaced through [`Workflow::add_jobs`] is
//! never mutated through a stale handle.

pub mod job;
pub mod step;
pub mod trigger;

pub use job::*;
pub use step::*;
pub use trigger::*;

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building or serializing a workflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("job '{0}' does not exist in workflow")]
    JobNotFound(String),

    #[error("failed to serialize workflow: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

/// A workflow document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workflow {
    name: String,

    #[serde(skip_serializing_if = "Triggers::is_empty")]
    on: Triggers,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    jobs: BTreeMap<String, Job>,
}

impl Workflow {
    /// Create an empty workflow
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on: Triggers::new(),
            jobs: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triggers(&self) -> &Triggers {
        &self.on
    }

    /// Replace the trigger set wholesale
    pub fn set_triggers(&mut self, triggers: Triggers) {
        self.on = triggers;
    }

    /// Insert jobs by name; an existing job with the same name is replaced
    pub fn add_jobs<I, K>(&mut self, jobs: I)
    where
        I: IntoIterator<Item = (K, Job)>,
        K: Into<String>,
    {
        for (name, job) in jobs {
            self.jobs.insert(name.into(), job);
        }
    }

    pub fn add_job(&mut self, name: impl Into<String>, job: Job) {
        self.jobs.insert(name.into(), job);
    }

    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    pub fn jobs(&self) -> &BTreeMap<String, Job> {
        &self.jobs
    }

    /// Add a step at the end of the named job
    pub fn append_step(&mut self, job_name: &str, step: Step) -> Result<(), WorkflowError> {
        self.job_mut(job_name)?.steps.push(step);
        Ok(())
    }

    /// Add a step at the front of the named job
    pub fn prepend_step(&mut self, job_name: &str, step: Step) -> Result<(), WorkflowError> {
        self.job_mut(job_name)?.steps.insert(0, step);
        Ok(())
    }

    /// Serialize the workflow to YAML text
    pub fn to_yaml_string(&self) -> Result<String, WorkflowError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize the workflow to YAML bytes, ready to be written to disk
    pub fn to_yaml(&self) -> Result<Vec<u8>, WorkflowError> {
        self.to_yaml_string().map(String::into_bytes)
    }

    fn job_mut(&mut self, job_name: &str) -> Result<&mut Job, WorkflowError> {
        self.jobs
            .get_mut(job_name)
            .ok_or_else(|| WorkflowError::JobNotFound(job_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_yaml::Value;

    fn parse(workflow: &Workflow) -> Value {
        serde_yaml::from_slice(&workflow.to_yaml().unwrap()).unwrap()
    }

    fn step_names(workflow: &Workflow, job: &str) -> Vec<String> {
        workflow
            .job(job)
            .unwrap()
            .steps
            .iter()
            .map(|s| s.name.clone().unwrap_or_default())
            .collect()
    }

    fn two_job_workflow() -> Workflow {
        let mut wf = Workflow::new("asd");
        wf.add_jobs([
            (
                "asd",
                Job::new("asd", "ubuntu-latest").with_step(Step::run("asdjob", "echo asd")),
            ),
            (
                "dsa",
                Job::new("dsa", "ubuntu-latest").with_step(Step::run("dsajob", "echo asd")),
            ),
        ]);
        wf
    }

    #[test]
    fn test_empty_workflow_only_has_name() {
        let value = parse(&Workflow::new("build"));
        let map = value.as_mapping().unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(value["name"].as_str(), Some("build"));
    }

    #[test]
    fn test_prepend_and_append_preserve_order() {
        let mut wf = Workflow::new("order");
        wf.add_job("build", Job::new("build", "ubuntu-latest").with_step(Step::run("A", "a")));

        wf.prepend_step("build", Step::run("P", "p")).unwrap();
        wf.append_step("build", Step::run("Q", "q")).unwrap();

        assert_eq!(step_names(&wf, "build"), vec!["P", "A", "Q"]);
    }

    #[test]
    fn test_step_mutation_on_missing_job_fails() {
        let mut wf = two_job_workflow();

        for name in ["missing", "", "ASD"] {
            let err = wf.append_step(name, Step::run("x", "x")).unwrap_err();
            assert!(matches!(err, WorkflowError::JobNotFound(ref n) if n == name));

            let err = wf.prepend_step(name, Step::default()).unwrap_err();
            assert!(matches!(err, WorkflowError::JobNotFound(ref n) if n == name));
        }

        // Failed mutations leave existing jobs untouched
        assert_eq!(step_names(&wf, "asd"), vec!["asdjob"]);
        assert_eq!(step_names(&wf, "dsa"), vec!["dsajob"]);
    }

    #[test]
    fn test_add_jobs_last_write_wins() {
        let mut wf = Workflow::new("collide");
        wf.add_jobs([
            ("build", Job::new("first", "ubuntu-latest")),
            ("lint", Job::new("lint", "ubuntu-latest")),
        ]);
        wf.add_jobs([
            ("build", Job::new("second", "macos-latest")),
            ("test", Job::new("test", "ubuntu-latest")),
        ]);

        assert_eq!(wf.jobs().len(), 3);
        assert_eq!(wf.job("build").unwrap().name.as_deref(), Some("second"));
        assert_eq!(wf.job("build").unwrap().runs_on.as_deref(), Some("macos-latest"));
        assert!(wf.job("lint").is_some());
        assert!(wf.job("test").is_some());
    }

    #[test]
    fn test_set_triggers_replaces_wholesale() {
        let mut wf = Workflow::new("triggers");
        wf.set_triggers(
            Triggers::new()
                .with(Trigger::Push(PushOptions::branches(["main"])))
                .with(Trigger::WorkflowDispatch),
        );
        wf.set_triggers(Triggers::new().with(Trigger::PullRequest(PullRequestOptions::default())));

        assert_eq!(wf.triggers().len(), 1);
        assert!(wf.triggers().get("push").is_none());

        let value = parse(&wf);
        assert!(value["on"]["pull_request"].as_mapping().unwrap().is_empty());
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let mut wf = two_job_workflow();
        wf.set_triggers(Triggers::new().with(Trigger::Push(PushOptions::branches(["main"]))));
        wf.append_step("asd", Step::run("appendtest", "echo asd")).unwrap();
        wf.prepend_step("dsa", Step::run("prependtest", "echo asd")).unwrap();

        let first = wf.to_yaml().unwrap();
        let second = wf.to_yaml().unwrap();
        assert_eq!(first, second);

        // Same mutation sequence on a fresh document yields the same bytes
        let mut again = two_job_workflow();
        again.set_triggers(Triggers::new().with(Trigger::Push(PushOptions::branches(["main"]))));
        again.append_step("asd", Step::run("appendtest", "echo asd")).unwrap();
        again.prepend_step("dsa", Step::run("prependtest", "echo asd")).unwrap();
        assert_eq!(first, again.to_yaml().unwrap());
    }

    #[test]
    fn test_serialized_structure() {
        let mut wf = two_job_workflow();
        wf.append_step("asd", Step::run("appendtest", "echo asd")).unwrap();
        wf.prepend_step("dsa", Step::run("prependtest", "echo asd")).unwrap();

        let value = parse(&wf);
        assert!(value.get("on").is_none());
        assert_eq!(value["jobs"]["asd"]["runs-on"].as_str(), Some("ubuntu-latest"));
        assert_eq!(value["jobs"]["asd"]["steps"][1]["name"].as_str(), Some("appendtest"));
        assert_eq!(value["jobs"]["dsa"]["steps"][0]["name"].as_str(), Some("prependtest"));
        assert_eq!(value["jobs"]["dsa"]["steps"][1]["run"].as_str(), Some("echo asd"));
    }

    #[test]
    fn test_job_not_found_message() {
        let err = WorkflowError::JobNotFound("build".to_string());
        assert_eq!(err.to_string(), "job 'build' does not exist in workflow");
    }
}
