// ABOUTME: Error types for step navigation and form sessions
// ABOUTME: Structural template errors halt navigation; missing answers are reported as data

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Step not found: {step_id}")]
    NotFound { step_id: String },

    #[error("Unknown option '{value}' submitted for field '{step_id}.{field_id}'")]
    UnknownOption {
        step_id: String,
        field_id: String,
        value: String,
    },

    #[error("Option '{option_id}' in field '{step_id}.{field_id}' points to unknown step '{target}'")]
    DanglingReference {
        step_id: String,
        field_id: String,
        option_id: String,
        target: String,
    },

    #[error("Template has no steps")]
    EmptyTemplate,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Form session has not been started")]
    NotStarted,

    #[error("Form session was already submitted")]
    AlreadySubmitted,

    #[error("Step '{step_id}' is not a last step and cannot be submitted")]
    NotTerminal { step_id: String },

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

pub type Result<T> = std::result::Result<T, NavigationError>;
pub type SessionResult<T> = std::result::Result<T, SessionError>;
