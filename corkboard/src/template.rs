//! Templates define the categories a board offers.
//!
//! The engine only consumes a template's category set and its default
//! category. Titles are carried along for whoever renders the board.

use crate::error::{BoardError, Result};
use crate::types::CategoryId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Name of the template new boards use
pub const DEFAULT_TEMPLATE: &str = "Default";

/// A category offered by a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub id: CategoryId,
    pub title: String,
}

impl CategorySpec {
    /// Create a category with a display title
    pub fn new(id: impl Into<CategoryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// The category layout of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub categories: Vec<CategorySpec>,
    #[serde(rename = "default")]
    pub default_category: CategoryId,
}

impl Template {
    /// Create a template; `default_category` should be one of `categories`.
    pub fn new(
        name: impl Into<String>,
        categories: Vec<CategorySpec>,
        default_category: impl Into<CategoryId>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            categories,
            default_category: default_category.into(),
        }
    }

    /// The single-category template
    pub fn default_template() -> Self {
        Self::new(
            DEFAULT_TEMPLATE,
            vec![CategorySpec::new("Todo", "Todo list")],
            "Todo",
        )
    }

    /// Todo / In progress / Completed
    pub fn trifold() -> Self {
        Self::new(
            "Trifold",
            vec![
                CategorySpec::new("Todo", "Todo list"),
                CategorySpec::new("Inprogress", "In progress"),
                CategorySpec::new("Complete", "Completed"),
            ],
            "Todo",
        )
    }

    /// Whether the template offers this category
    pub fn contains(&self, category: &CategoryId) -> bool {
        self.categories.iter().any(|c| &c.id == category)
    }

    /// Category ids in display order
    pub fn category_ids(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.iter().map(|c| &c.id)
    }

    /// Resolve a requested category, silently falling back to the default
    /// when it is missing or not part of this template.
    pub fn resolve(&self, requested: Option<&CategoryId>) -> CategoryId {
        match requested {
            Some(category) if self.contains(category) => category.clone(),
            _ => self.default_category.clone(),
        }
    }

    /// A template is usable when its default is one of its categories
    pub fn is_valid(&self) -> bool {
        self.contains(&self.default_category)
    }
}

/// Known templates, keyed by name in registration order
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// Registry with the built-in templates
    pub fn builtin() -> Self {
        Self {
            templates: vec![Template::default_template(), Template::trifold()],
        }
    }

    /// Built-ins plus `extra`; an extra template replaces a built-in of the same name.
    pub fn with_templates(extra: impl IntoIterator<Item = Template>) -> Self {
        let mut registry = Self::builtin();
        for template in extra {
            registry.register(template);
        }
        registry
    }

    /// Add or replace a template. Templates whose default category is not
    /// one of their categories are skipped.
    pub fn register(&mut self, template: Template) -> bool {
        if !template.is_valid() {
            warn!(
                "Skipping template '{}': default category '{}' is not one of its categories",
                template.name, template.default_category
            );
            return false;
        }
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
        true
    }

    /// Look up a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Look up a template by name, failing if it is unknown
    pub fn require(&self, name: &str) -> Result<&Template> {
        self.get(name).ok_or_else(|| BoardError::TemplateNotFound {
            name: name.to_string(),
        })
    }

    /// Template for a board, falling back to the default template when the
    /// board names one that is no longer registered.
    pub fn for_board(&self, name: &str) -> Template {
        match self.get(name) {
            Some(template) => template.clone(),
            None => {
                warn!("Unknown template '{}', using '{}'", name, DEFAULT_TEMPLATE);
                self.get(DEFAULT_TEMPLATE)
                    .cloned()
                    .unwrap_or_else(Template::default_template)
            }
        }
    }

    /// Registered template names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
