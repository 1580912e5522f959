// ABOUTME: Command implementations for the stepgraph CLI
// ABOUTME: Handles execution of validate, graph, walk, init, and categories commands

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use super::args::Args;
use super::config::Config;
use crate::catalog;
use crate::navigator::{Advance, FormSession, StepNavigator, SubmitOutcome, Transition};
use crate::parser::{Template, TemplateFormat, TemplateParser, TemplateValidator};
use crate::submission::{JsonFileSink, SubmissionSink};
use crate::ui::{Toast, ToastPresenter, TracingToastPresenter};

/// Where a walk stopped
#[derive(Debug, Clone, PartialEq)]
pub enum WalkStatus {
    Terminal,
    Blocked { step_id: String, missing: Vec<String> },
    Submitted { submission_id: String, file: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkSummary {
    pub path: Vec<String>,
    pub status: WalkStatus,
}

async fn load_template(template_path: &Path) -> Result<Template> {
    TemplateParser::new()
        .parse_file(template_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to parse template: {}", e))
}

/// Validate a template file
pub async fn validate_template(
    template_path: PathBuf,
    strict: bool,
    config: &Config,
) -> Result<()> {
    info!("Validating template: {}", template_path.display());

    let template = load_template(&template_path).await?;
    let report = TemplateValidator::new()
        .with_strict_mode(strict || config.strict_validation)
        .validate(&template);

    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
    for error in &report.errors {
        println!("  error: {}", error);
    }

    if !report.is_valid {
        return Err(anyhow::anyhow!(
            "Template '{}' has {} error(s)",
            template.name,
            report.errors.len()
        ));
    }

    println!("✓ Template '{}' is valid", template.name);
    println!("  Steps: {}", template.steps.len());
    println!("  Warnings: {}", report.warnings.len());

    info!("Template validation completed successfully");
    Ok(())
}

/// Print steps and their outgoing transitions
pub async fn print_graph(template_path: PathBuf) -> Result<()> {
    let template = load_template(&template_path).await?;
    let navigator = StepNavigator::new(template)?;
    let graph = navigator.graph();

    println!("{}", navigator.template().name);
    for step in graph.steps() {
        let marker = if step.is_last_step { " [last]" } else { "" };
        println!("  {} - {}{}", step.step_id, step.title, marker);

        for (target, transition) in graph.successors(&step.step_id) {
            match transition {
                Transition::Option { field_id, value } => {
                    println!("    {}={} -> {}", field_id, value, target)
                }
                Transition::Sequential => println!("    (next) -> {}", target),
            }
        }
    }

    Ok(())
}

/// Drive a session through a template with fixed answers
pub async fn walk_template(
    template_path: PathBuf,
    answers: Vec<String>,
    submit: bool,
    submissions_dir: Option<PathBuf>,
    config: &Config,
) -> Result<WalkSummary> {
    info!("Walking template: {}", template_path.display());

    let answers = Args::parse_answers(&answers)?;
    let template = load_template(&template_path).await?;
    let max_steps = template.steps.len();
    let navigator = Arc::new(StepNavigator::new(template)?);

    let mut session = FormSession::new(navigator);
    for (field_id, value) in answers {
        session.answer(field_id, value)?;
    }
    session.start()?;

    let status = loop {
        match session.advance()? {
            Advance::Moved { to, .. } => {
                println!("  -> {}", to);
                // fixed answers around a loop in the template would never finish
                if session.visited_path().len() > max_steps {
                    return Err(anyhow::anyhow!(
                        "Walk revisited steps without finishing: {}",
                        session.visited_path().join(" -> ")
                    ));
                }
            }
            Advance::Blocked(validation) => {
                let step_id = session.current_step()?.step_id.clone();
                warn!("Walk stopped on '{}': missing {:?}", step_id, validation.missing);
                break WalkStatus::Blocked {
                    step_id,
                    missing: validation.missing,
                };
            }
            Advance::AtTerminal => break WalkStatus::Terminal,
        }
    };

    let path = session.visited_path().to_vec();
    println!("Path: {}", path.join(" -> "));

    let status = match status {
        WalkStatus::Terminal if submit => {
            let presenter = TracingToastPresenter;
            match session.submit()? {
                SubmitOutcome::Submitted(submission) => {
                    let sink = JsonFileSink::new(
                        submissions_dir.unwrap_or_else(|| config.submissions_dir()),
                    );
                    sink.deliver(&submission).await?;
                    presenter.present(&Toast::success(format!(
                        "Submission {} saved",
                        submission.id
                    )));
                    WalkStatus::Submitted {
                        submission_id: submission.id.to_string(),
                        file: sink.path_for(&submission),
                    }
                }
                SubmitOutcome::Blocked(validation) => {
                    presenter.present(&Toast::warning(format!(
                        "Cannot submit, missing: {}",
                        validation.missing.join(", ")
                    )));
                    WalkStatus::Blocked {
                        step_id: path.last().cloned().unwrap_or_default(),
                        missing: validation.missing,
                    }
                }
            }
        }
        other => other,
    };

    match &status {
        WalkStatus::Terminal => println!("Reached last step"),
        WalkStatus::Blocked { step_id, missing } => {
            println!("Blocked on '{}': missing {}", step_id, missing.join(", "))
        }
        WalkStatus::Submitted { file, .. } => println!("Submitted to {}", file.display()),
    }

    Ok(WalkSummary { path, status })
}

/// Write the bundled template to `<output_dir>/<name>.<ext>`
pub async fn init_template(name: String, output_dir: PathBuf, format: String) -> Result<PathBuf> {
    let format: TemplateFormat = format.parse()?;
    info!(
        "Initializing template '{}' in {}",
        name,
        output_dir.display()
    );

    if !output_dir.exists() {
        tokio::fs::create_dir_all(&output_dir).await?;
    }

    let template_file = output_dir.join(format!("{}.{}", name, format.file_extension()));
    if template_file.exists() {
        return Err(anyhow::anyhow!(
            "Template file already exists: {}",
            template_file.display()
        ));
    }

    let content = match format {
        TemplateFormat::Yaml => catalog::default_template_yaml().to_string(),
        TemplateFormat::Json => catalog::default_template()?.to_json()?,
    };
    tokio::fs::write(&template_file, content).await?;

    info!("Created template file: {}", template_file.display());
    Ok(template_file)
}

/// Print the bundled template categories
pub async fn list_categories() -> Result<()> {
    for category in catalog::categories() {
        println!("{:<20} {} - {}", category.id, category.name, category.description);
    }
    Ok(())
}
