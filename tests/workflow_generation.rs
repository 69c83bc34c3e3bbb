//! Workflow generation from project configurations

mod helpers;

use gojen::generate_workflows;
use gojen::workflow::{ActivityTypes, PushOptions, StepKind, Trigger};
use helpers::*;
use pretty_assertions::assert_eq;

#[test]
fn test_build_workflow_only() {
    let config = config_from_json(
        r#"{
            "name": "test",
            "repository": "github.com/test/test",
            "buildWorkflow": true,
            "release": false,
            "goLinter": true
        }"#,
    );

    let generated = generate_workflows(&config).unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].file_name, "build.yml");

    let wf = &generated[0].workflow;
    let job_names: Vec<&str> = wf.jobs().keys().map(String::as_str).collect();
    assert_eq!(job_names, vec!["build", "golangci"]);

    let steps = &wf.job("build").unwrap().steps;
    assert_eq!(steps[0].kind(), StepKind::Uses("actions/checkout@v2"));

    // The unconditional part of the job ends with change detection; only the
    // self-mutation steps guarded by its output follow.
    let last_unguarded = steps.iter().rev().find(|s| s.condition.is_none()).unwrap();
    assert_eq!(last_unguarded.id.as_deref(), Some("git_diff"));
    assert!(steps
        .iter()
        .all(|s| s.name.as_deref() != Some("Exit 1 if changes found")));

    let value = parse_yaml(&generated[0].contents);
    assert_eq!(keys(&value["on"]), vec!["pull_request"]);
    assert!(value["on"]["pull_request"].as_mapping().unwrap().is_empty());
}

#[test]
fn test_release_workflows() {
    let config = config_from_json(
        r#"{
            "name": "test",
            "repository": "github.com/test/test",
            "release": true,
            "defaultReleaseBranch": "main"
        }"#,
    );

    let generated = generate_workflows(&config).unwrap();
    let files: Vec<&str> = generated.iter().map(|g| g.file_name).collect();
    assert_eq!(files, vec!["release.yml", "upload-binary.yml"]);

    let release = &generated[0].workflow;
    assert_eq!(
        release.triggers().get("push"),
        Some(&Trigger::Push(PushOptions::branches(["main"])))
    );
    assert_eq!(release.triggers().len(), 1);
    assert_eq!(release.job("release").unwrap().needs, vec!["golangci", "build"]);

    let guard = release.job("build").unwrap().steps.last().unwrap();
    assert_eq!(guard.name.as_deref(), Some("Exit 1 if changes found"));
    assert_eq!(
        guard.condition.as_deref(),
        Some("steps.git_diff.outputs.has_changes")
    );

    let value = parse_yaml(&generated[0].contents);
    assert_eq!(value["on"]["push"]["branches"][0].as_str(), Some("main"));
    assert_eq!(value["jobs"]["release"]["needs"][1].as_str(), Some("build"));
    assert_eq!(
        value["jobs"]["release"]["steps"][1]["with"]["github-token"].as_str(),
        Some("${{ secrets.GITHUB_TOKEN }}")
    );

    let upload = &generated[1].workflow;
    assert_eq!(upload.name(), "Upload Binary");
    assert_eq!(
        upload.triggers().get("release"),
        Some(&Trigger::Release(ActivityTypes::new(["published"])))
    );
    assert!(upload.job("upload-binary").is_some());
}

#[test]
fn test_generator_steps_serialize_without_empty_fields() {
    let mut config = base_config();
    config.build_workflow = Some(true);

    let generated = generate_workflows(&config).unwrap();
    let value = parse_yaml(&generated[0].contents);
    let steps = value["jobs"]["build"]["steps"].as_sequence().unwrap();

    let generator: Vec<&serde_yaml::Value> = steps
        .iter()
        .filter(|s| s["name"].as_str().map_or(false, |n| n.ends_with("gojen")))
        .collect();

    assert_eq!(generator.len(), 2);
    assert_eq!(generator[0]["name"].as_str(), Some("Install gojen"));
    assert_eq!(generator[1]["name"].as_str(), Some("Run gojen"));
    for step in generator {
        assert_eq!(keys(step), vec!["name", "run"]);
    }
}

#[test]
fn test_user_steps_are_spliced_in_order() {
    let config = config_from_json(
        r#"{
            "name": "test",
            "repository": "github.com/test/test",
            "buildWorkflow": true,
            "codeCov": true,
            "workflowEnv": { "asd": "testenv" },
            "prependSteps": [
                { "name": "prependteststep1", "run": "test1" },
                { "name": "prependteststep2", "run": "test2" }
            ],
            "appendSteps": [
                { "name": "appendtest1", "run": "test1" },
                { "name": "appendtest2", "run": "test2" }
            ]
        }"#,
    );

    let generated = generate_workflows(&config).unwrap();
    let names: Vec<String> = generated[0]
        .workflow
        .job("build")
        .unwrap()
        .steps
        .iter()
        .map(|s| s.name.clone().unwrap_or_default())
        .collect();

    assert_eq!(
        names,
        vec![
            "Checkout",
            "Setup go",
            "prependteststep1",
            "prependteststep2",
            "Install gojen",
            "Run gojen",
            "Upload codecov coverage",
            "Check for changes",
            "appendtest1",
            "appendtest2",
            "Commit and push changes (if changed)",
            "Update status check (if changed)",
            "Cancel workflow (if changed)",
        ]
    );

    let value = parse_yaml(&generated[0].contents);
    assert_eq!(
        value["jobs"]["build"]["steps"][5]["env"]["asd"].as_str(),
        Some("testenv")
    );
}

#[test]
fn test_generation_is_deterministic() {
    let mut config = base_config();
    config.build_workflow = Some(true);
    config.release = Some(true);
    config.workflow_env = Some(
        [
            ("B".to_string(), "2".to_string()),
            ("A".to_string(), "1".to_string()),
        ]
        .into(),
    );

    let first = generate_workflows(&config).unwrap();
    let second = generate_workflows(&config).unwrap();

    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.contents, b.contents);
        assert_eq!(a.workflow.to_yaml().unwrap(), a.contents);
    }
}

#[test]
fn test_custom_token_reaches_every_secret_reference() {
    let mut config = base_config();
    config.build_workflow = Some(true);
    config.release = Some(true);
    config.github_token = Some("BOT_TOKEN".to_string());

    for generated in generate_workflows(&config).unwrap() {
        let text = String::from_utf8(generated.contents).unwrap();
        assert!(text.contains("secrets.BOT_TOKEN"), "{}", generated.file_name);
        assert!(!text.contains("secrets.GITHUB_TOKEN"), "{}", generated.file_name);
    }
}
