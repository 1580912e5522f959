// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a template builder and temporary directories for template files

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

pub struct TestTemplateBuilder {
    name: String,
    category: String,
    entry_step_id: Option<String>,
    steps: Vec<TestStep>,
}

pub struct TestStep {
    pub id: String,
    pub is_last: bool,
    pub fields: Vec<TestField>,
}

pub struct TestField {
    pub id: String,
    pub field_type: String,
    pub required: bool,
    /// (option id, value, target step)
    pub options: Vec<(String, String, Option<String>)>,
}

impl TestStep {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            is_last: false,
            fields: Vec::new(),
        }
    }

    pub fn last(mut self) -> Self {
        self.is_last = true;
        self
    }

    pub fn text(mut self, id: &str, required: bool) -> Self {
        self.fields.push(TestField {
            id: id.to_string(),
            field_type: "text".to_string(),
            required,
            options: Vec::new(),
        });
        self
    }

    /// Radio field; each option is `(value, target)` and gets the option id `<field>_<value>`
    pub fn radio(mut self, id: &str, required: bool, options: &[(&str, Option<&str>)]) -> Self {
        self.fields.push(TestField {
            id: id.to_string(),
            field_type: "radio".to_string(),
            required,
            options: options
                .iter()
                .map(|(value, target)| {
                    (
                        format!("{}_{}", id, value),
                        value.to_string(),
                        target.map(str::to_string),
                    )
                })
                .collect(),
        });
        self
    }
}

impl TestTemplateBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: "general".to_string(),
            entry_step_id: None,
            steps: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_entry(mut self, step_id: &str) -> Self {
        self.entry_step_id = Some(step_id.to_string());
        self
    }

    pub fn with_step(mut self, step: TestStep) -> Self {
        self.steps.push(step);
        self
    }

    pub async fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.generate_yaml()).await
    }

    pub fn generate_yaml(&self) -> String {
        let mut yaml = format!("name: \"{}\"\ncategory: {}\n", self.name, self.category);
        if let Some(entry) = &self.entry_step_id {
            yaml.push_str(&format!("entryStepId: \"{}\"\n", entry));
        }

        yaml.push_str("steps:\n");
        for step in &self.steps {
            yaml.push_str(&format!("  - stepId: \"{}\"\n", step.id));
            yaml.push_str(&format!("    title: \"{}\"\n", step.id));
            if step.is_last {
                yaml.push_str("    isLastStep: true\n");
            }

            if step.fields.is_empty() {
                yaml.push_str("    fields: []\n");
                continue;
            }

            yaml.push_str("    fields:\n");
            for field in &step.fields {
                yaml.push_str(&format!("      - fieldId: \"{}\"\n", field.id));
                yaml.push_str(&format!("        type: {}\n", field.field_type));
                yaml.push_str(&format!("        label: \"{}\"\n", field.id));
                yaml.push_str(&format!("        required: {}\n", field.required));

                if !field.options.is_empty() {
                    yaml.push_str("        options:\n");
                    for (option_id, value, target) in &field.options {
                        yaml.push_str(&format!("          - optionId: \"{}\"\n", option_id));
                        yaml.push_str(&format!("            label: \"{}\"\n", value));
                        yaml.push_str(&format!("            value: \"{}\"\n", value));
                        if let Some(target) = target {
                            yaml.push_str(&format!("            nextFieldId: \"{}\"\n", target));
                        }
                    }
                }
            }
        }

        yaml
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn template_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.yaml", name))
    }

    pub async fn create_template_file(&self, name: &str, builder: &TestTemplateBuilder) -> PathBuf {
        let template_file = self.template_file(name);
        builder
            .write_to_file(&template_file)
            .await
            .expect("Failed to write template file");
        template_file
    }

    pub async fn write_bundled_template(&self, name: &str) -> PathBuf {
        let template_file = self.template_file(name);
        fs::write(&template_file, stepgraph::catalog::default_template_yaml())
            .await
            .expect("Failed to write bundled template");
        template_file
    }
}

/// Two-way branch on `kind`, both arms meeting at `done`
pub fn branching_template() -> TestTemplateBuilder {
    TestTemplateBuilder::new("branching")
        .with_step(TestStep::new("start").text("name", true).radio(
            "kind",
            true,
            &[("a", Some("path_a")), ("b", Some("path_b"))],
        ))
        .with_step(TestStep::new("path_a").text("detail_a", false))
        .with_step(TestStep::new("path_b").text("detail_b", true))
        .with_step(TestStep::new("done").last())
}

pub async fn read_json(file_path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(file_path)
        .await
        .expect("Failed to read JSON file");
    serde_json::from_str(&content).expect("Invalid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_builder() {
        let yaml = branching_template().with_entry("start").generate_yaml();

        assert!(yaml.contains("name: \"branching\""));
        assert!(yaml.contains("entryStepId: \"start\""));
        assert!(yaml.contains("nextFieldId: \"path_a\""));
        assert!(yaml.contains("isLastStep: true"));
    }

    #[test]
    fn test_environment_setup() {
        let env = TestEnvironment::new();
        assert!(env.path().exists());
        assert!(env
            .template_file("test")
            .to_string_lossy()
            .contains("test.yaml"));
    }
}
