// ABOUTME: Core template data structures and parsing functionality
// ABOUTME: Defines the Template, step, field and option types loaded from YAML or JSON

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use super::error::{ParserError, Result, ValidationError};

fn default_category() -> String {
    "general".to_string()
}

fn default_active() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Explicit entry step. When absent the first step in sequence is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_step_id: Option<String>,
    pub steps: Vec<TemplateStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStep {
    pub step_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<TemplateField>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_last_step: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateField {
    pub field_id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<TemplateOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOption {
    pub option_id: String,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_field_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Email,
    Radio,
    ImageSelect,
}

/// On-disk encodings a template can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFormat {
    #[default]
    Yaml,
    Json,
}

impl Template {
    /// Parse template from a YAML or JSON file, chosen by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ParserError::IoError)?;
        Self::from_str_with_format(&content, TemplateFormat::from_path(path))
    }

    /// Parse template from YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let template: Template = serde_yaml::from_str(content).map_err(ParserError::YamlError)?;
        template.validate_structure()?;
        Ok(template)
    }

    /// Parse template from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let template: Template = serde_json::from_str(content).map_err(ParserError::JsonError)?;
        template.validate_structure()?;
        Ok(template)
    }

    pub fn from_str_with_format(content: &str, format: TemplateFormat) -> Result<Self> {
        match format {
            TemplateFormat::Yaml => Self::from_yaml(content),
            TemplateFormat::Json => Self::from_json(content),
        }
    }

    /// Validate basic template structure
    fn validate_structure(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ParserError::MissingField("name".to_string()));
        }

        if self.steps.is_empty() {
            return Err(ParserError::ValidationError(ValidationError::EmptyTemplate));
        }

        for (position, step) in self.steps.iter().enumerate() {
            if step.step_id.trim().is_empty() {
                return Err(ParserError::MissingField(format!(
                    "steps[{}].stepId",
                    position
                )));
            }
            for (field_position, field) in step.fields.iter().enumerate() {
                if field.field_id.trim().is_empty() {
                    return Err(ParserError::MissingField(format!(
                        "steps[{}].fields[{}].fieldId",
                        position, field_position
                    )));
                }
            }
        }

        Ok(())
    }

    /// Id of the step a new session starts on
    pub fn entry_step_id(&self) -> Option<&str> {
        match self.entry_step_id.as_deref() {
            Some(step_id) => Some(step_id),
            None => self.steps.first().map(|step| step.step_id.as_str()),
        }
    }

    pub fn step_ids(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.step_id.clone()).collect()
    }

    pub fn get_step(&self, step_id: &str) -> Option<&TemplateStep> {
        self.steps.iter().find(|step| step.step_id == step_id)
    }

    pub fn has_step(&self, step_id: &str) -> bool {
        self.get_step(step_id).is_some()
    }

    /// Ids of every step flagged as the last step
    pub fn terminal_step_ids(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter(|step| step.is_last_step)
            .map(|step| step.step_id.clone())
            .collect()
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ParserError::YamlError)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ParserError::JsonError)
    }

    /// Save template to file, encoding chosen by extension
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match TemplateFormat::from_path(path) {
            TemplateFormat::Yaml => self.to_yaml()?,
            TemplateFormat::Json => self.to_json()?,
        };
        std::fs::write(path, content).map_err(ParserError::IoError)?;
        Ok(())
    }
}

impl TemplateStep {
    pub fn get_field(&self, field_id: &str) -> Option<&TemplateField> {
        self.fields.iter().find(|field| field.field_id == field_id)
    }

    /// Fields that carry selectable options, in field order
    pub fn option_fields(&self) -> impl Iterator<Item = &TemplateField> {
        self.fields.iter().filter(|field| field.has_options())
    }
}

impl TemplateField {
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn option_for_value(&self, value: &str) -> Option<&TemplateOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

impl TemplateOption {
    /// Step this option transitions to, ignoring blank ids
    pub fn target_step(&self) -> Option<&str> {
        self.next_field_id
            .as_deref()
            .filter(|target| !target.trim().is_empty())
    }
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Radio => "radio",
            FieldType::ImageSelect => "image_select",
        }
    }

    /// Whether fields of this type present a fixed set of options
    pub fn accepts_options(&self) -> bool {
        matches!(self, FieldType::Radio | FieldType::ImageSelect)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TemplateFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TemplateFormat::Json,
            _ => TemplateFormat::Yaml,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            TemplateFormat::Yaml => "yaml",
            TemplateFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for TemplateFormat {
    type Err = ParserError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(TemplateFormat::Yaml),
            "json" => Ok(TemplateFormat::Json),
            other => Err(ParserError::InvalidFormat(format!(
                "unknown template format '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateParser;

impl TemplateParser {
    pub fn new() -> Self {
        Self
    }

    pub async fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Template> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(ParserError::IoError)?;
        Template::from_str_with_format(&content, TemplateFormat::from_path(path))
    }
}

impl Default for TemplateParser {
    fn default() -> Self {
        Self::new()
    }
}
