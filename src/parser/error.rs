// ABOUTME: Error types for template parsing and integrity validation
// ABOUTME: Defines specific error types for parser module operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to read template file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid template format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Empty template: no steps defined")]
    EmptyTemplate,

    #[error("Duplicate step id: {step}")]
    DuplicateStep { step: String },

    #[error("Duplicate field id '{field}' in step '{step}'")]
    DuplicateField { step: String, field: String },

    #[error("Duplicate option id '{option}' in field '{step}.{field}'")]
    DuplicateOption {
        step: String,
        field: String,
        option: String,
    },

    #[error("Duplicate option value '{value}' in field '{step}.{field}'")]
    DuplicateOptionValue {
        step: String,
        field: String,
        value: String,
    },

    #[error("Option '{option}' in field '{step}.{field}' points to unknown step '{target}'")]
    DanglingReference {
        step: String,
        field: String,
        option: String,
        target: String,
    },

    #[error("Field '{step}.{field}' of type {field_type} cannot declare options")]
    UnexpectedOptions {
        step: String,
        field: String,
        field_type: String,
    },

    #[error("Field '{step}.{field}' of type {field_type} has no options")]
    MissingOptions {
        step: String,
        field: String,
        field_type: String,
    },

    #[error("Entry step '{step}' does not exist")]
    UnknownEntryStep { step: String },

    #[error("No step is marked as the last step")]
    NoTerminalStep,

    #[error("Multiple steps are marked as the last step: {steps:?}")]
    MultipleTerminalSteps { steps: Vec<String> },
}

pub type Result<T> = std::result::Result<T, ParserError>;
