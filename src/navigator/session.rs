// ABOUTME: Form session state machine driving the navigator
// ABOUTME: Owns the visited path and answer set from the entry step through submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::answers::AnswerSet;
use super::error::{SessionError, SessionResult};
use super::resolver::{NextStep, StepNavigator, ValidationResult};
use crate::parser::TemplateStep;
use crate::submission::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Submitted,
}

/// Result of trying to move past the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved {
        from: String,
        to: String,
        transition: NextStep,
    },
    /// Required fields are unanswered; the step stays put.
    Blocked(ValidationResult),
    /// The current step is a last step; submit instead.
    AtTerminal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Submission),
    Blocked(ValidationResult),
}

#[derive(Debug, Clone)]
pub struct FormSession {
    id: Uuid,
    navigator: Arc<StepNavigator>,
    path: Vec<String>,
    answers: AnswerSet,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
}

impl FormSession {
    pub fn new(navigator: Arc<StepNavigator>) -> Self {
        Self {
            id: Uuid::new_v4(),
            navigator,
            path: Vec::new(),
            answers: AnswerSet::new(),
            state: SessionState::NotStarted,
            started_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn visited_path(&self) -> &[String] {
        &self.path
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    /// Enter the entry step. Starting a session already in progress is a no-op.
    pub fn start(&mut self) -> SessionResult<&TemplateStep> {
        match self.state {
            SessionState::Submitted => return Err(SessionError::AlreadySubmitted),
            SessionState::InProgress => return self.current_step(),
            SessionState::NotStarted => {}
        }

        let entry = self.navigator.entry_step()?.step_id.clone();
        info!(
            "Session {} started on '{}' ({})",
            self.id,
            entry,
            self.navigator.template().name
        );
        self.path.push(entry);
        self.state = SessionState::InProgress;
        self.started_at = Some(Utc::now());
        self.current_step()
    }

    pub fn current_step(&self) -> SessionResult<&TemplateStep> {
        self.ensure_in_progress()?;
        Ok(self.navigator.current_step(&self.path)?)
    }

    pub fn answer(
        &mut self,
        field_id: impl Into<String>,
        value: impl Into<String>,
    ) -> SessionResult<()> {
        self.ensure_editable()?;
        self.answers.insert(field_id, value);
        Ok(())
    }

    pub fn clear_answer(&mut self, field_id: &str) -> SessionResult<Option<String>> {
        self.ensure_editable()?;
        Ok(self.answers.remove(field_id))
    }

    /// Required fields of the current step still unanswered
    pub fn validate_current(&self) -> SessionResult<ValidationResult> {
        let step = self.current_step()?;
        Ok(self.navigator.validate_step(step, &self.answers))
    }

    pub fn is_at_terminal(&self) -> SessionResult<bool> {
        let step = self.current_step()?;
        Ok(self.navigator.is_terminal(step))
    }

    /// Validate the current step and move to whatever follows it
    pub fn advance(&mut self) -> SessionResult<Advance> {
        let step = self.current_step()?;

        let validation = self.navigator.validate_step(step, &self.answers);
        if !validation.is_valid() {
            return Ok(Advance::Blocked(validation));
        }

        let from = step.step_id.clone();
        let transition = self.navigator.resolve_next(step, &self.answers)?;
        let Some(to) = transition.step_id().map(str::to_string) else {
            debug!("Session {} is at last step '{}'", self.id, from);
            return Ok(Advance::AtTerminal);
        };

        debug!("Session {} moved '{}' -> '{}'", self.id, from, to);
        self.path.push(to.clone());
        Ok(Advance::Moved {
            from,
            to,
            transition,
        })
    }

    /// Step back along the visited path, never past the entry step.
    /// Answers are kept; the next advance recomputes from them.
    pub fn back(&mut self) -> SessionResult<Option<&TemplateStep>> {
        self.ensure_in_progress()?;
        if self.path.len() <= 1 {
            return Ok(None);
        }

        self.path.pop();
        debug!("Session {} went back to {:?}", self.id, self.path.last());
        Ok(Some(self.current_step()?))
    }

    /// Finish the session from a last step. The submission carries only the
    /// answers to fields on the visited path.
    pub fn submit(&mut self) -> SessionResult<SubmitOutcome> {
        let step = self.current_step()?;
        if !self.navigator.is_terminal(step) {
            return Err(SessionError::NotTerminal {
                step_id: step.step_id.clone(),
            });
        }

        let validation = self.navigator.validate_step(step, &self.answers);
        if !validation.is_valid() {
            return Ok(SubmitOutcome::Blocked(validation));
        }

        let template = self.navigator.template();
        let mut visited_fields = HashSet::new();
        for step_id in &self.path {
            let step = self.navigator.step(step_id)?;
            visited_fields.extend(step.fields.iter().map(|field| field.field_id.as_str()));
        }

        let submission = Submission {
            id: Uuid::new_v4(),
            session_id: self.id,
            template_name: template.name.clone(),
            template_category: template.category.clone(),
            path: self.path.clone(),
            answers: self.answers.restricted_to(&visited_fields),
            started_at: self.started_at,
            submitted_at: Utc::now(),
        };

        info!(
            "Session {} submitted {} answers after {} steps",
            self.id,
            submission.answers.len(),
            submission.path.len()
        );
        self.state = SessionState::Submitted;
        Ok(SubmitOutcome::Submitted(submission))
    }

    fn ensure_in_progress(&self) -> SessionResult<()> {
        match self.state {
            SessionState::NotStarted => Err(SessionError::NotStarted),
            SessionState::Submitted => Err(SessionError::AlreadySubmitted),
            SessionState::InProgress => Ok(()),
        }
    }

    fn ensure_editable(&self) -> SessionResult<()> {
        match self.state {
            SessionState::Submitted => Err(SessionError::AlreadySubmitted),
            _ => Ok(()),
        }
    }
}
