//! Standard workflows generated for a project
//!
//! The build job of every pipeline is assembled by name: it is added with a
//! checkout step, then the shared steps are appended one by one, then the
//! pipeline-specific tail. Any [`WorkflowError`] aborts the pipeline.

use crate::project::config::{ProjectConfig, COVERAGE_FILE};
use crate::workflow::{
    ActivityTypes, Job, PullRequestOptions, PushOptions, Step, Trigger, Triggers, Workflow,
    WorkflowError,
};
use tracing::debug;

/// Directory the workflow files are written to, relative to the project
pub const WORKFLOWS_DIR: &str = ".github/workflows";

pub const LINT_JOB: &str = "golangci";
pub const BUILD_JOB: &str = "build";
pub const RELEASE_JOB: &str = "release";
pub const UPLOAD_BINARY_JOB: &str = "upload-binary";

/// Identifier of the change detection step
pub const CHANGE_DETECTION_ID: &str = "git_diff";

const RUNNER: &str = "ubuntu-latest";
const HAS_CHANGES: &str = "steps.git_diff.outputs.has_changes";

/// A serialized workflow ready to be written
#[derive(Debug, Clone)]
pub struct GeneratedWorkflow {
    /// File name inside [`WORKFLOWS_DIR`]
    pub file_name: &'static str,
    pub workflow: Workflow,
    pub contents: Vec<u8>,
}

impl GeneratedWorkflow {
    fn serialize(file_name: &'static str, workflow: Workflow) -> Result<Self, WorkflowError> {
        let contents = workflow.to_yaml()?;
        Ok(Self {
            file_name,
            workflow,
            contents,
        })
    }
}

/// Build and serialize every workflow the configuration asks for
///
/// Nothing is returned unless all of them serialized.
pub fn generate_workflows(config: &ProjectConfig) -> Result<Vec<GeneratedWorkflow>, WorkflowError> {
    let mut generated = Vec::new();

    if config.is_build_workflow() {
        generated.push(GeneratedWorkflow::serialize("build.yml", build_workflow(config)?)?);
    }

    if config.is_release() {
        generated.push(GeneratedWorkflow::serialize(
            "release.yml",
            release_workflow(config)?,
        )?);
        generated.push(GeneratedWorkflow::serialize(
            "upload-binary.yml",
            upload_binary_workflow(config),
        )?);
    }

    debug!("Generated {} workflow(s)", generated.len());
    Ok(generated)
}

/// Pull request workflow that runs gojen and commits the self mutation
pub fn build_workflow(config: &ProjectConfig) -> Result<Workflow, WorkflowError> {
    let mut wf = Workflow::new("build");
    wf.set_triggers(Triggers::new().with(Trigger::PullRequest(PullRequestOptions::default())));

    add_common_jobs(&mut wf, config)?;

    let token = secret_ref(config.github_token());

    wf.append_step(
        BUILD_JOB,
        Step::run(
            "Commit and push changes (if changed)",
            "git add . && git commit -m 'chore: self mutation' && git push origin HEAD:${{ github.event.pull_request.head.ref }}",
        )
        .when(HAS_CHANGES)
        .with_env("GITHUB_TOKEN", token.clone()),
    )?;

    wf.append_step(
        BUILD_JOB,
        Step::run(
            "Update status check (if changed)",
            "gh api -X POST /repos/${{ github.event.pull_request.head.repo.full_name }}/check-runs -F name=\"build\" -F head_sha=\"$(git rev-parse HEAD)\" -F status=\"completed\" -F conclusion=\"success\"",
        )
        .when(HAS_CHANGES)
        .with_env("GITHUB_TOKEN", token.clone()),
    )?;

    wf.append_step(
        BUILD_JOB,
        Step::run(
            "Cancel workflow (if changed)",
            "gh api -X POST /repos/${{ github.event.pull_request.head.repo.full_name }}/actions/runs/${{ github.run_id }}/cancel",
        )
        .when(HAS_CHANGES)
        .with_env("GITHUB_TOKEN", token),
    )?;

    Ok(wf)
}

/// Release workflow on pushes to the release branch
pub fn release_workflow(config: &ProjectConfig) -> Result<Workflow, WorkflowError> {
    let mut wf = Workflow::new("release");
    wf.set_triggers(Triggers::new().with(Trigger::Push(PushOptions::branches([
        config.default_release_branch(),
    ]))));

    add_common_jobs(&mut wf, config)?;

    // Releases must be cut from a tree that already contains gojen's output
    wf.append_step(
        BUILD_JOB,
        Step::run("Exit 1 if changes found", "exit 1").when(HAS_CHANGES),
    )?;

    wf.add_job(
        RELEASE_JOB,
        Job::new("create release", RUNNER)
            .needs([LINT_JOB, BUILD_JOB])
            .with_step(checkout_step())
            .with_step(
                Step::uses("Create Release", "go-semantic-release/action@v1")
                    .with_id("create-release")
                    .with_input("github-token", secret_ref(config.github_token()))
                    .with_input("changelog-generator-opt", "emojis=false")
                    .with_input("force-bump-patch-version", true),
            ),
    );

    Ok(wf)
}

/// Workflow attaching a linux/amd64 binary to published releases
pub fn upload_binary_workflow(config: &ProjectConfig) -> Workflow {
    let mut wf = Workflow::new("Upload Binary");
    wf.set_triggers(Triggers::new().with(Trigger::Release(ActivityTypes::new(["published"]))));

    wf.add_job(
        UPLOAD_BINARY_JOB,
        Job::new("upload binary", RUNNER)
            .with_step(checkout_step())
            .with_step(
                Step::uses("Upload binary", "wangyoucao577/go-release-action@v1.19")
                    .with_input("github_token", secret_ref(config.github_token()))
                    .with_input("goos", "linux")
                    .with_input("goarch", "amd64")
                    .with_input("goversion", config.go_version()),
            ),
    );

    wf
}

/// Add the lint job and the build job with its shared steps
pub fn add_common_jobs(wf: &mut Workflow, config: &ProjectConfig) -> Result<(), WorkflowError> {
    wf.add_job(LINT_JOB, lint_job());
    wf.add_job(BUILD_JOB, Job::new("build", RUNNER).with_step(checkout_step()));

    for step in common_steps(config) {
        wf.append_step(BUILD_JOB, step)?;
    }

    Ok(())
}

/// Steps shared by the build job of every pipeline, in order
pub fn common_steps(config: &ProjectConfig) -> Vec<Step> {
    let mut steps = vec![Step::uses("Setup go", "actions/setup-go@v2")
        .with_input("go-version", config.go_version())];

    steps.extend(config.prepend_steps().iter().cloned());

    if config.is_gojen() {
        steps.push(
            Step::run(
                "Build and run gojen",
                "cargo build --release && ./target/release/gojen --ci",
            )
            .with_envs(config.workflow_env()),
        );
    } else {
        steps.push(Step::run("Install gojen", install_command(config.gojen_version())));
        steps.push(Step::run("Run gojen", "gojen --ci").with_envs(config.workflow_env()));
    }

    if config.is_code_cov() {
        steps.push(
            Step::uses("Upload codecov coverage", "codecov/codecov-action@v2")
                .with_input("files", format!("./{}", COVERAGE_FILE)),
        );
    }

    steps.push(
        Step::run(
            "Check for changes",
            "git diff --exit-code || echo \"::set-output name=has_changes::true\"",
        )
        .with_id(CHANGE_DETECTION_ID),
    );

    steps.extend(config.append_steps().iter().cloned());

    steps
}

fn lint_job() -> Job {
    Job::new("lint", RUNNER)
        .with_step(checkout_step())
        .with_step(
            Step::uses("Lint using golangci-lint", "golangci/golangci-lint-action@v2")
                .with_input("args", "--timeout=5m"),
        )
}

fn checkout_step() -> Step {
    Step::uses("Checkout", "actions/checkout@v2")
}

fn install_command(version: &str) -> String {
    if version == "latest" {
        "cargo install gojen --locked".to_string()
    } else {
        format!("cargo install gojen --locked --version {}", version)
    }
}

/// Expression reading a repository secret
fn secret_ref(name: &str) -> String {
    format!("${{{{ secrets.{} }}}}", name)
}
