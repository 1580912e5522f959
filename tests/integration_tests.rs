// ABOUTME: Integration tests for the stepgraph command implementations
// ABOUTME: Runs validate, walk and init end to end against files in a temp directory

use stepgraph::cli::commands::{self, WalkStatus};
use stepgraph::cli::Config;
use stepgraph::parser::{Template, TemplateValidator};

mod common;
use common::{branching_template, read_json, TestEnvironment, TestStep, TestTemplateBuilder};

fn answers(pairs: &[&str]) -> Vec<String> {
    pairs.iter().map(|pair| pair.to_string()).collect()
}

#[tokio::test]
async fn test_validate_bundled_template() {
    let env = TestEnvironment::new();
    let file = env.write_bundled_template("lead").await;

    commands::validate_template(file, true, &Config::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_validate_reports_broken_template() {
    let env = TestEnvironment::new();
    let builder = TestTemplateBuilder::new("broken")
        .with_step(TestStep::new("start").radio("go", true, &[("x", Some("missing"))]))
        .with_step(TestStep::new("end").last());
    let file = env.create_template_file("broken", &builder).await;

    let result = commands::validate_template(file, false, &Config::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_walk_stops_on_missing_answers() {
    let env = TestEnvironment::new();
    let file = env.write_bundled_template("lead").await;

    let summary = commands::walk_template(
        file,
        answers(&["full_name=Ada", "email=ada@example.com", "main_selection=two"]),
        false,
        None,
        &Config::default(),
    )
    .await
    .unwrap();

    assert_eq!(summary.path, vec!["step1", "step3_new-item-1760613552639"]);
    assert_eq!(
        summary.status,
        WalkStatus::Blocked {
            step_id: "step3_new-item-1760613552639".to_string(),
            missing: vec!["app_platform".to_string()],
        }
    );
}

#[tokio::test]
async fn test_walk_to_last_step_without_submitting() {
    let env = TestEnvironment::new();
    let file = env
        .create_template_file("branching", &branching_template())
        .await;

    let summary = commands::walk_template(
        file,
        answers(&["name=Ada", "kind=b", "detail_b=fast"]),
        false,
        None,
        &Config::default(),
    )
    .await
    .unwrap();

    assert_eq!(summary.path, vec!["start", "path_b", "done"]);
    assert_eq!(summary.status, WalkStatus::Terminal);
}

#[tokio::test]
async fn test_walk_with_submit_writes_submission() {
    let env = TestEnvironment::new();
    let file = env.write_bundled_template("lead").await;
    let submissions_dir = env.path().join("out");

    let summary = commands::walk_template(
        file,
        answers(&[
            "full_name=Ada",
            "email=ada@example.com",
            "main_selection=three",
            "support_level=basic",
            "message=Call after five",
        ]),
        true,
        Some(submissions_dir.clone()),
        &Config::default(),
    )
    .await
    .unwrap();

    let (submission_id, file) = match summary.status {
        WalkStatus::Submitted {
            submission_id,
            file,
        } => (submission_id, file),
        other => panic!("expected a submission, got {:?}", other),
    };
    assert_eq!(file, submissions_dir.join(format!("{}.json", submission_id)));

    let json = read_json(&file).await;
    assert_eq!(json["answers"]["support_level"], "basic");
    assert_eq!(json["answers"]["message"], "Call after five");
    assert_eq!(json["template_category"], "lead_generation");
}

#[tokio::test]
async fn test_walk_rejects_unknown_option() {
    let env = TestEnvironment::new();
    let file = env.write_bundled_template("lead").await;

    let result = commands::walk_template(
        file,
        answers(&["full_name=Ada", "email=ada@example.com", "main_selection=seven"]),
        false,
        None,
        &Config::default(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_init_writes_valid_template() {
    let env = TestEnvironment::new();

    let yaml_file = commands::init_template(
        "lead".to_string(),
        env.path().to_path_buf(),
        "yaml".to_string(),
    )
    .await
    .unwrap();
    assert_eq!(yaml_file, env.path().join("lead.yaml"));

    let json_file = commands::init_template(
        "lead".to_string(),
        env.path().join("json"),
        "json".to_string(),
    )
    .await
    .unwrap();

    for file in [&yaml_file, &json_file] {
        let template = Template::from_file(file).unwrap();
        assert!(TemplateValidator::new().validate(&template).is_valid);
        assert_eq!(template.steps.len(), 5);
    }
}

#[tokio::test]
async fn test_init_refuses_to_overwrite() {
    let env = TestEnvironment::new();
    let existing = env.write_bundled_template("lead").await;

    let result =
        commands::init_template("lead".to_string(), env.path().to_path_buf(), "yaml".to_string())
            .await;

    assert!(result.is_err());
    assert!(existing.exists());
}

#[tokio::test]
async fn test_init_rejects_unknown_format() {
    let env = TestEnvironment::new();

    let result =
        commands::init_template("lead".to_string(), env.path().to_path_buf(), "toml".to_string())
            .await;

    assert!(result.is_err());
}
