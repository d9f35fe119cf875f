//! Prompt templates keyed by travel category.
//!
//! The catalogue is built once at startup with [`TemplateCatalogue::standard`],
//! which validates every template body against its declared parameters, and is
//! then shared read-only with the dispatcher.

mod category;
mod templates;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub use category::Category;

use crate::error::PlanError;

/// Parameter name → value, as projected from a trip request.
pub type Params = BTreeMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[A-Za-z_][A-Za-z0-9_]*\}").expect("placeholder regex must compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    category: Category,
    parameters: Vec<String>,
    body: String,
}

impl Template {
    pub fn new(category: Category, parameters: &[&str], body: impl Into<String>) -> Self {
        Self {
            category,
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            body: body.into(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Placeholder names in body order, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        PLACEHOLDER
            .find_iter(&self.body)
            .map(|m| strip_braces(m.as_str()))
    }

    /// Every placeholder must be declared. Declared-but-unused parameters are allowed.
    pub fn validate(&self) -> Result<(), PlanError> {
        match self
            .placeholders()
            .find(|name| !self.parameters.iter().any(|p| p.as_str() == *name))
        {
            Some(name) => Err(PlanError::UnboundPlaceholder {
                category: self.category,
                placeholder: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn instantiate(&self, params: &Params) -> Result<String, PlanError> {
        if let Some(missing) = self.parameters.iter().find(|p| !params.contains_key(*p)) {
            return Err(PlanError::MissingParameter {
                category: self.category,
                parameter: missing.clone(),
            });
        }

        let mut rendered = String::with_capacity(self.body.len());
        let mut last = 0;
        for found in PLACEHOLDER.find_iter(&self.body) {
            let name = strip_braces(found.as_str());
            let value = params
                .get(name)
                .ok_or_else(|| PlanError::UnboundPlaceholder {
                    category: self.category,
                    placeholder: name.to_string(),
                })?;
            rendered.push_str(&self.body[last..found.start()]);
            rendered.push_str(value);
            last = found.end();
        }
        rendered.push_str(&self.body[last..]);

        Ok(rendered.trim().to_string())
    }
}

fn strip_braces(placeholder: &str) -> &str {
    placeholder
        .trim_start_matches('{')
        .trim_end_matches('}')
}

/// Immutable registry of one template per category.
#[derive(Debug, Clone)]
pub struct TemplateCatalogue {
    templates: Vec<Template>,
}

impl TemplateCatalogue {
    /// The built-in travel templates, validated.
    pub fn standard() -> Result<Self, PlanError> {
        let templates = templates::standard_definitions()
            .into_iter()
            .map(|(category, parameters, body)| Template::new(category, parameters, body))
            .collect();
        Self::from_templates(templates)
    }

    pub fn from_templates(templates: Vec<Template>) -> Result<Self, PlanError> {
        for template in &templates {
            template.validate()?;
        }
        Ok(Self { templates })
    }

    pub fn get_template(&self, category: Category) -> Result<&Template, PlanError> {
        self.templates
            .iter()
            .find(|template| template.category == category)
            .ok_or_else(|| PlanError::UnknownCategory(category.key().to_string()))
    }

    /// Look up a template by category key (e.g. `"itinerary"`).
    pub fn lookup(&self, name: &str) -> Result<&Template, PlanError> {
        let category: Category = name.parse()?;
        self.get_template(category)
    }

    pub fn instantiate(&self, category: Category, params: &Params) -> Result<String, PlanError> {
        self.get_template(category)?.instantiate(params)
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }
}

#[cfg(test)]
mod tests;
