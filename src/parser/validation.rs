// ABOUTME: Template integrity validation run at load time
// ABOUTME: Checks identifiers, option wiring, terminal steps and step reachability

use std::collections::HashSet;

use super::error::ValidationError;
use super::template::{Template, TemplateField, TemplateStep};
use crate::navigator::StepGraph;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub is_valid: bool,
}

pub struct TemplateValidator {
    strict_mode: bool,
}

impl TemplateValidator {
    pub fn new() -> Self {
        Self { strict_mode: false }
    }

    /// In strict mode multiple terminal steps are an error rather than a warning
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Validate a complete template
    pub fn validate(&self, template: &Template) -> ValidationReport {
        let mut report = ValidationReport::new();

        if template.steps.is_empty() {
            report.errors.push(ValidationError::EmptyTemplate);
            report.is_valid = false;
            return report;
        }

        self.validate_identifiers(template, &mut report);
        self.validate_fields(template, &mut report);
        self.validate_entry_step(template, &mut report);
        self.validate_terminal_steps(template, &mut report);
        self.check_reachability(template, &mut report);

        report.is_valid = report.errors.is_empty();
        report
    }

    /// Step ids must be unique across the template, field ids within a step
    fn validate_identifiers(&self, template: &Template, report: &mut ValidationReport) {
        let mut step_ids = HashSet::new();
        for step in &template.steps {
            if !step_ids.insert(step.step_id.as_str()) {
                report.errors.push(ValidationError::DuplicateStep {
                    step: step.step_id.clone(),
                });
            }

            let mut field_ids = HashSet::new();
            for field in &step.fields {
                if !field_ids.insert(field.field_id.as_str()) {
                    report.errors.push(ValidationError::DuplicateField {
                        step: step.step_id.clone(),
                        field: field.field_id.clone(),
                    });
                }
            }
        }
    }

    fn validate_fields(&self, template: &Template, report: &mut ValidationReport) {
        for step in &template.steps {
            for field in &step.fields {
                self.validate_single_field(template, step, field, report);
            }
        }
    }

    /// Option placement, option uniqueness and option targets for one field
    fn validate_single_field(
        &self,
        template: &Template,
        step: &TemplateStep,
        field: &TemplateField,
        report: &mut ValidationReport,
    ) {
        let accepts_options = field.field_type.accepts_options();

        if !accepts_options && field.has_options() {
            report.errors.push(ValidationError::UnexpectedOptions {
                step: step.step_id.clone(),
                field: field.field_id.clone(),
                field_type: field.field_type.to_string(),
            });
        }

        if accepts_options && !field.has_options() {
            report.errors.push(ValidationError::MissingOptions {
                step: step.step_id.clone(),
                field: field.field_id.clone(),
                field_type: field.field_type.to_string(),
            });
        }

        let mut option_ids = HashSet::new();
        let mut option_values = HashSet::new();
        for option in &field.options {
            if !option_ids.insert(option.option_id.as_str()) {
                report.errors.push(ValidationError::DuplicateOption {
                    step: step.step_id.clone(),
                    field: field.field_id.clone(),
                    option: option.option_id.clone(),
                });
            }

            if !option_values.insert(option.value.as_str()) {
                report.errors.push(ValidationError::DuplicateOptionValue {
                    step: step.step_id.clone(),
                    field: field.field_id.clone(),
                    value: option.value.clone(),
                });
            }

            if let Some(target) = option.target_step() {
                if !template.has_step(target) {
                    report.errors.push(ValidationError::DanglingReference {
                        step: step.step_id.clone(),
                        field: field.field_id.clone(),
                        option: option.option_id.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
    }

    fn validate_entry_step(&self, template: &Template, report: &mut ValidationReport) {
        if let Some(entry) = template.entry_step_id.as_deref() {
            if !template.has_step(entry) {
                report.errors.push(ValidationError::UnknownEntryStep {
                    step: entry.to_string(),
                });
            }
        }
    }

    fn validate_terminal_steps(&self, template: &Template, report: &mut ValidationReport) {
        let terminal_steps = template.terminal_step_ids();

        match terminal_steps.len() {
            0 => report.errors.push(ValidationError::NoTerminalStep),
            1 => {}
            _ if self.strict_mode => {
                report.errors.push(ValidationError::MultipleTerminalSteps {
                    steps: terminal_steps,
                });
            }
            _ => report.warnings.push(format!(
                "Multiple steps are marked as the last step: {}",
                terminal_steps.join(", ")
            )),
        }

        if let Some(last) = template.steps.last() {
            if !last.is_last_step && StepGraph::can_fall_through(last) {
                report.warnings.push(format!(
                    "Step '{}' is last in sequence but not marked as the last step",
                    last.step_id
                ));
            }
        }
    }

    /// Warn about steps no session can visit and steps no session can finish from
    fn check_reachability(&self, template: &Template, report: &mut ValidationReport) {
        let graph = StepGraph::from_template(template.clone());

        let Some(entry) = graph.entry_step_id() else {
            return;
        };
        if !graph.contains(entry) {
            return;
        }

        let reachable = graph.reachable_from(entry);
        let mut seen = HashSet::new();
        for step in &template.steps {
            if seen.insert(step.step_id.as_str()) && !reachable.contains(&step.step_id) {
                report
                    .warnings
                    .push(format!("Step '{}' is unreachable", step.step_id));
            }
        }

        if template.terminal_step_ids().is_empty() {
            return;
        }

        for step_id in graph.steps_without_exit() {
            if reachable.contains(&step_id) {
                report.warnings.push(format!(
                    "No last step can be reached from step '{}'",
                    step_id
                ));
            }
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl Default for TemplateValidator {
    fn default() -> Self {
        Self::new()
    }
}
