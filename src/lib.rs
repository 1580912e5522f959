// ABOUTME: Main library module for the stepgraph form navigator
// ABOUTME: Exports all core modules and provides the public API

pub mod catalog;
pub mod cli;
pub mod navigator;
pub mod parser;
pub mod submission;
pub mod ui;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use navigator::{
    Advance, AnswerSet, FormSession, NavigationError, NextStep, StepGraph, StepNavigator,
    ValidationResult,
};
pub use parser::{Template, TemplateParser, TemplateStep, TemplateValidator};
pub use submission::{Submission, SubmissionSink};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
