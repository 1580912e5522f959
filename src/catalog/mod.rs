// ABOUTME: Bundled template categories and the default multi-step template
// ABOUTME: Static configuration a host application offers before any template is authored

use serde::Serialize;

use crate::parser::error::Result;
use crate::parser::Template;

const DEFAULT_TEMPLATE_YAML: &str = include_str!("../../templates/default_template.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const TEMPLATE_CATEGORIES: &[TemplateCategory] = &[
    TemplateCategory {
        id: "lead_generation",
        name: "Lead Generation",
        description: "Capture contact details and qualify prospects",
    },
    TemplateCategory {
        id: "customer_feedback",
        name: "Customer Feedback",
        description: "Surveys and satisfaction questionnaires",
    },
    TemplateCategory {
        id: "event_registration",
        name: "Event Registration",
        description: "Sign-ups for events, webinars and workshops",
    },
    TemplateCategory {
        id: "quiz",
        name: "Quiz",
        description: "Branching questionnaires that route on each answer",
    },
];

pub fn categories() -> &'static [TemplateCategory] {
    TEMPLATE_CATEGORIES
}

pub fn find_category(id: &str) -> Option<&'static TemplateCategory> {
    TEMPLATE_CATEGORIES.iter().find(|category| category.id == id)
}

/// The bundled branching template
pub fn default_template() -> Result<Template> {
    Template::from_yaml(DEFAULT_TEMPLATE_YAML)
}

/// Raw YAML of the bundled template, as written by `init`
pub fn default_template_yaml() -> &'static str {
    DEFAULT_TEMPLATE_YAML
}
