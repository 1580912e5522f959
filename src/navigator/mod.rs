// ABOUTME: Step navigation module for branching multi-step forms
// ABOUTME: Indexes templates, resolves next steps and drives form sessions

pub mod answers;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod session;

pub use answers::AnswerSet;
pub use error::{NavigationError, Result, SessionError, SessionResult};
pub use graph::{StepGraph, Transition};
pub use resolver::{NextStep, StepNavigator, ValidationResult};
pub use session::{Advance, FormSession, SessionState, SubmitOutcome};
