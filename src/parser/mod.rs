// ABOUTME: Parser module for YAML and JSON form templates
// ABOUTME: Exports template parsing, integrity validation, and data structures

pub mod error;
pub mod template;
pub mod validation;

pub use error::{ParserError, ValidationError};
pub use template::{
    FieldType, Template, TemplateField, TemplateFormat, TemplateOption, TemplateParser,
    TemplateStep,
};
pub use validation::{TemplateValidator, ValidationReport};
