//! Job step model

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// A single step in a job
///
/// Multi-word keys are written in kebab-case. Older `gojen.json` files spell
/// them in camelCase, which is accepted on input.
///
/// A step either runs a shell command (`run`) or invokes a reusable action
/// (`uses`). Both fields exist so user-supplied steps deserialize as written,
/// but only one of them is meaningful for a given step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Step {
    /// Identifier other steps use to reference this step's outputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Guard expression evaluated by the runner
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Action reference, e.g. `actions/checkout@v2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,

    /// Shell command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,

    #[serde(
        default,
        alias = "workingDirectory",
        alias = "WorkingDirectory",
        skip_serializing_if = "Option::is_none"
    )]
    pub working_directory: Option<String>,

    /// Action inputs
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub with: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(
        default,
        alias = "timeoutMinutes",
        alias = "TimeoutMinutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_minutes: Option<u32>,

    #[serde(
        default,
        alias = "continueOnError",
        alias = "ContinueOnError",
        skip_serializing_if = "Option::is_none"
    )]
    pub continue_on_error: Option<bool>,
}

/// How a step executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind<'a> {
    /// Shell command
    Run(&'a str),
    /// Reusable action
    Uses(&'a str),
    /// Neither `run` nor `uses` is set
    Empty,
}

impl Step {
    /// Create a step that runs a shell command
    pub fn run(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            run: Some(command.into()),
            ..Default::default()
        }
    }

    /// Create a step that invokes an action
    pub fn uses(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            uses: Some(action.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Only run the step when `condition` holds
    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Add an action input
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Merge a whole environment mapping into the step
    pub fn with_envs<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(env.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }

    /// Execution mode of the step; `run` wins if both are set
    pub fn kind(&self) -> StepKind<'_> {
        match (&self.run, &self.uses) {
            (Some(command), _) => StepKind::Run(command),
            (None, Some(action)) => StepKind::Uses(action),
            (None, None) => StepKind::Empty,
        }
    }
}
