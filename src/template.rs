//! Template rendering collaborator
//!
//! The builder can take its content from a named template plus a data
//! mapping instead of a raw HTML string. Rendering is delegated to a
//! [`TemplateRenderer`], the seam where a host application plugs in its own
//! template engine; errors from the collaborator propagate to the caller
//! unchanged.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Template error types
#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template [{template}] failed to render: {message}")]
    RenderFailed { template: String, message: String },
}

pub type Result<T> = std::result::Result<T, TemplateError>;

/// Produces an HTML string from a template name and a data mapping
pub trait TemplateRenderer {
    /// Render the named template with the given data
    fn render(&self, template: &str, data: &Value) -> Result<String>;
}

/// A minimal in-memory template store
///
/// Substitutes `{{ key }}` placeholders from a JSON object. Intended for
/// tests, demos, and the CLI; host applications supply their own
/// [`TemplateRenderer`] backed by a real engine.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    templates: HashMap<String, String>,
}

impl StaticTemplates {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under a name
    pub fn register(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.templates.insert(name.into(), body.into());
    }

    fn substitute(body: &str, data: &Value) -> String {
        let Some(map) = data.as_object() else {
            return body.to_string();
        };

        let mut rendered = body.to_string();

        for (key, value) in map {
            let replacement = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            for placeholder in [format!("{{{{ {key} }}}}"), format!("{{{{{key}}}}}")] {
                rendered = rendered.replace(&placeholder, &replacement);
            }
        }

        rendered
    }
}

impl TemplateRenderer for StaticTemplates {
    fn render(&self, template: &str, data: &Value) -> Result<String> {
        let body = self
            .templates
            .get(template)
            .ok_or_else(|| TemplateError::NotFound(template.to_string()))?;

        Ok(Self::substitute(body, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_substitutes_placeholders() {
        let mut templates = StaticTemplates::new();
        templates.register("invoice", "<h1>Invoice {{ number }}</h1><p>{{customer}}</p>");

        let html = templates
            .render("invoice", &json!({ "number": 42, "customer": "Acme" }))
            .unwrap();

        assert_eq!(html, "<h1>Invoice 42</h1><p>Acme</p>");
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let templates = StaticTemplates::new();
        let err = templates.render("missing", &json!({})).unwrap_err();

        assert_eq!(err, TemplateError::NotFound("missing".to_string()));
    }

    #[test]
    fn test_render_without_data_object_returns_body() {
        let mut templates = StaticTemplates::new();
        templates.register("plain", "<p>static</p>");

        let html = templates.render("plain", &Value::Null).unwrap();
        assert_eq!(html, "<p>static</p>");
    }
}
