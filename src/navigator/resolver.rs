// ABOUTME: Stateless step navigation over an indexed template
// ABOUTME: Resolves the current step, validates required fields and computes the next step

use serde::Serialize;
use tracing::{debug, warn};

use super::answers::AnswerSet;
use super::error::{NavigationError, Result};
use super::graph::StepGraph;
use crate::parser::{Template, TemplateStep};

/// Outcome of advancing from a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextStep {
    /// An answered option named the next step.
    Branch {
        step_id: String,
        field_id: String,
        option_id: String,
    },
    /// No option applied; the next step in sequence follows.
    Sequential { step_id: String },
    /// Nothing follows; the only way forward is submission.
    Terminal,
}

impl NextStep {
    pub fn step_id(&self) -> Option<&str> {
        match self {
            NextStep::Branch { step_id, .. } | NextStep::Sequential { step_id } => {
                Some(step_id.as_str())
            }
            NextStep::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NextStep::Terminal)
    }
}

/// Required fields of a step that still lack an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub missing: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn is_missing(&self, field_id: &str) -> bool {
        self.missing.iter().any(|missing| missing == field_id)
    }
}

/// Immutable once built, so a single navigator can serve any number of
/// concurrent sessions behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StepNavigator {
    graph: StepGraph,
}

impl StepNavigator {
    pub fn new(template: Template) -> Result<Self> {
        if template.steps.is_empty() {
            return Err(NavigationError::EmptyTemplate);
        }
        Ok(Self {
            graph: StepGraph::from_template(template),
        })
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn template(&self) -> &Template {
        self.graph.template()
    }

    pub fn step(&self, step_id: &str) -> Result<&TemplateStep> {
        self.graph
            .step(step_id)
            .ok_or_else(|| NavigationError::NotFound {
                step_id: step_id.to_string(),
            })
    }

    pub fn entry_step(&self) -> Result<&TemplateStep> {
        let entry = self
            .graph
            .entry_step_id()
            .ok_or(NavigationError::EmptyTemplate)?;
        self.step(entry)
    }

    /// Step at the end of `visited_path`, or the entry step for an empty path
    pub fn current_step(&self, visited_path: &[String]) -> Result<&TemplateStep> {
        match visited_path.last() {
            Some(step_id) => self.step(step_id),
            None => self.entry_step(),
        }
    }

    /// Required fields of `step` whose answer is absent or blank, in field order
    pub fn validate_step(&self, step: &TemplateStep, answers: &AnswerSet) -> ValidationResult {
        let mut missing: Vec<String> = Vec::new();
        for field in step.fields.iter().filter(|field| field.required) {
            if !answers.is_answered(&field.field_id) && !missing.contains(&field.field_id) {
                missing.push(field.field_id.clone());
            }
        }

        if !missing.is_empty() {
            debug!("Step '{}' is missing required fields: {:?}", step.step_id, missing);
        }
        ValidationResult { missing }
    }

    /// Compute where the session goes after `step` given the current answers.
    ///
    /// Every answered option field must name one of its declared values. The
    /// first field in field order whose chosen option routes somewhere wins;
    /// without one the next step in sequence follows.
    pub fn resolve_next(&self, step: &TemplateStep, answers: &AnswerSet) -> Result<NextStep> {
        if step.is_last_step {
            return Ok(NextStep::Terminal);
        }

        let position = self
            .graph
            .position(&step.step_id)
            .ok_or_else(|| NavigationError::NotFound {
                step_id: step.step_id.clone(),
            })?;

        let mut branch = None;
        for field in step.option_fields() {
            let Some(value) = answers.non_empty(&field.field_id) else {
                continue;
            };

            let option = field
                .option_for_value(value)
                .ok_or_else(|| NavigationError::UnknownOption {
                    step_id: step.step_id.clone(),
                    field_id: field.field_id.clone(),
                    value: value.to_string(),
                })?;

            if branch.is_some() {
                continue;
            }
            if let Some(target) = self.graph.transition(&step.step_id, &field.field_id, value) {
                branch = Some((field, option, target));
            }
        }

        if let Some((field, option, target)) = branch {
            if !self.graph.contains(target) {
                return Err(NavigationError::DanglingReference {
                    step_id: step.step_id.clone(),
                    field_id: field.field_id.clone(),
                    option_id: option.option_id.clone(),
                    target: target.to_string(),
                });
            }

            debug!(
                "Step '{}' branches to '{}' via {}={}",
                step.step_id, target, field.field_id, option.value
            );
            return Ok(NextStep::Branch {
                step_id: target.to_string(),
                field_id: field.field_id.clone(),
                option_id: option.option_id.clone(),
            });
        }

        match self.graph.steps().get(position + 1) {
            Some(next) => {
                debug!("Step '{}' continues to '{}'", step.step_id, next.step_id);
                Ok(NextStep::Sequential {
                    step_id: next.step_id.clone(),
                })
            }
            None => {
                warn!(
                    "Step '{}' has no successor but is not marked as the last step",
                    step.step_id
                );
                Ok(NextStep::Terminal)
            }
        }
    }

    pub fn is_terminal(&self, step: &TemplateStep) -> bool {
        step.is_last_step
    }
}
