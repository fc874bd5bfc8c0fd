//! FILENAME: core/columns/src/view.rs
//! PURPOSE: View rendering collaborator used by columns that emit markup.
//! CONTEXT: The host application may plug in its own renderer; the default
//! `TemplateViews` renders MiniJinja templates and ships the built-in
//! `datatables::*` views.

use minijinja::Environment;
use std::collections::HashMap;

use crate::error::ColumnError;

/// Template name of the boolean cell view.
pub const BOOLEAN_VIEW: &str = "datatables::boolean";

const BOOLEAN_TEMPLATE: &str = concat!(
    "{% if value %}",
    r#"<svg class="h-5 w-5 stroke-current text-green-600" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">"#,
    r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7"/></svg>"#,
    "{% else %}",
    r#"<svg class="h-5 w-5 stroke-current text-red-600" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">"#,
    r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/></svg>"#,
    "{% endif %}",
);

/// Renders a named view with JSON parameters into a markup fragment.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, params: &serde_json::Value) -> Result<String, ColumnError>;
}

/// MiniJinja-backed view renderer with the built-in datatable views.
pub struct TemplateViews {
    env: Environment<'static>,
    templates: HashMap<String, String>,
}

impl TemplateViews {
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert(BOOLEAN_VIEW.to_string(), BOOLEAN_TEMPLATE.to_string());

        TemplateViews {
            env: Environment::new(),
            templates,
        }
    }

    /// Register a view, replacing any built-in view with the same name.
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl Default for TemplateViews {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateViews {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.templates.keys().collect();
        names.sort();
        f.debug_struct("TemplateViews")
            .field("templates", &names)
            .finish_non_exhaustive()
    }
}

impl ViewRenderer for TemplateViews {
    fn render(&self, template: &str, params: &serde_json::Value) -> Result<String, ColumnError> {
        let source = self
            .templates
            .get(template)
            .ok_or_else(|| ColumnError::View(format!("view '{}' not found", template)))?;

        let rendered = self.env.render_named_str(template, source, params)?;
        Ok(rendered.trim().to_string())
    }
}
