//! Test utility functions for gojen
#![allow(dead_code)]

use async_trait::async_trait;
use gojen::{CommandOutput, Invocation, ProjectConfig, Toolchain, ToolchainError};
use std::sync::Mutex;

/// Mock toolchain that records every invocation instead of spawning it
pub struct MockToolchain {
    calls: Mutex<Vec<Invocation>>,
    /// Commands starting with this prefix fail
    fail_on: Option<String>,
    stdout: String,
    /// Stdout reported by the failing command
    failure_stdout: String,
}

impl MockToolchain {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
            stdout: String::new(),
            failure_stdout: String::new(),
        }
    }

    /// Make every command starting with `prefix` exit with code 1
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_on: Some(prefix.to_string()),
            ..Self::new()
        }
    }

    /// Fail like `failing_on`, reporting `stdout` the way `go test` does
    pub fn failing_on_with_stdout(prefix: &str, stdout: &str) -> Self {
        Self {
            fail_on: Some(prefix.to_string()),
            failure_stdout: stdout.to_string(),
            ..Self::new()
        }
    }

    /// Print `stdout` for every successful command
    pub fn with_stdout(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Self::new()
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines in the order they ran
    pub fn commands(&self) -> Vec<String> {
        self.invocations().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl Toolchain for MockToolchain {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ToolchainError> {
        self.calls.lock().unwrap().push(invocation.clone());

        let command = invocation.to_string();
        if let Some(prefix) = &self.fail_on {
            if command.starts_with(prefix.as_str()) {
                return Err(ToolchainError::Failed {
                    command,
                    code: 1,
                    stdout: self.failure_stdout.clone(),
                    stderr: "mock failure".to_string(),
                });
            }
        }

        Ok(CommandOutput {
            stdout: self.stdout.clone(),
            stderr: String::new(),
        })
    }
}

/// Parse a config the way gojen.json is parsed
pub fn config_from_json(json: &str) -> ProjectConfig {
    ProjectConfig::from_json(json).expect("test config should be valid")
}

/// Minimal valid config
pub fn base_config() -> ProjectConfig {
    ProjectConfig {
        name: Some("test".to_string()),
        repository: Some("github.com/test/test".to_string()),
        ..Default::default()
    }
}

/// Parse serialized workflow bytes back into a YAML value
pub fn parse_yaml(bytes: &[u8]) -> serde_yaml::Value {
    serde_yaml::from_slice(bytes).expect("workflow should be valid YAML")
}

/// Keys of a YAML mapping, as strings
pub fn keys(value: &serde_yaml::Value) -> Vec<String> {
    value
        .as_mapping()
        .expect("expected a mapping")
        .keys()
        .map(|k| k.as_str().expect("string key").to_string())
        .collect()
}
