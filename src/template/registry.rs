//! Template registry: loading, category filtering, and title sorting.
//!
//! Templates are plain YAML files in a directory tree. The registry loads all
//! of them once at startup; files that fail to parse are logged and skipped
//! rather than failing the whole wizard, since templates are externally
//! authored data.

use super::{DeviceCategory, PARAM_USAGE, Template};
use crate::core::WizardError;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Loaded template collection with category-aware lookup.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    templates: Vec<Template>,
}

impl Registry {
    /// Create a registry from already-parsed templates (used by tests and
    /// embedded catalogs).
    #[must_use]
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Load every `*.yaml`/`*.yml` file under `dir`, recursively.
    ///
    /// Unparseable files are skipped with a warning. Returns an error only
    /// when the directory itself cannot be read.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(WizardError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("template directory '{}' not found", dir.display()),
            )))
            .with_context(|| format!("failed to load templates from '{}'", dir.display()));
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry
                .with_context(|| format!("failed to walk template directory '{}'", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            match path.extension().and_then(|e| e.to_str()) {
                Some("yaml" | "yml") => {}
                _ => continue,
            }

            match Self::load_file(path) {
                Ok(template) => {
                    debug!(template = %template.template, path = %path.display(), "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unparseable template");
                }
            }
        }

        debug!(count = templates.len(), "template registry loaded");
        Ok(Self { templates })
    }

    /// Parse a single template file.
    pub fn load_file(path: &Path) -> Result<Template> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template '{}'", path.display()))?;
        let template = serde_yaml::from_str::<Template>(&raw).map_err(|e| WizardError::TemplateParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(template)
    }

    /// Number of loaded templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when no templates are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Find a template by identifier.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.template == name)
    }

    /// Templates offered for a device category, sorted for display.
    ///
    /// A template matches when its class matches the category's class, it has
    /// at least one parameter, and either the category has no usage filter or
    /// the template's `usage` choices contain the filter value. Ungrouped
    /// templates sort before grouped ones; within that, sorting is
    /// case-insensitive by group then title.
    #[must_use]
    pub fn for_category(&self, category: DeviceCategory) -> Vec<&Template> {
        let mut items: Vec<&Template> = self
            .templates
            .iter()
            .filter(|t| t.class == category.class())
            .filter(|t| !t.params.is_empty())
            .filter(|t| match category.usage_filter() {
                Some(filter) => t.choice_contains(PARAM_USAGE, filter),
                None => true,
            })
            .collect();

        items.sort_by(|a, b| {
            // generic (grouped) templates go to the bottom
            match (a.group.is_empty(), b.group.is_empty()) {
                (true, false) => return std::cmp::Ordering::Less,
                (false, true) => return std::cmp::Ordering::Greater,
                _ => {}
            }
            let group = a.group.to_lowercase().cmp(&b.group.to_lowercase());
            if group != std::cmp::Ordering::Equal {
                return group;
            }
            a.title().to_lowercase().cmp(&b.title().to_lowercase())
        });

        items
    }
}
