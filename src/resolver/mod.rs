//! The parameter-resolution engine.
//!
//! Given a device template, the resolver computes the final, consistent set of
//! configuration values in a single forward pass:
//!
//! 1. Satisfy the template-level requirements ([`requirements`])
//! 2. Expand the structural-variant parameter into concrete sub-parameters
//!    on an owned working copy of the parameter list ([`variant`])
//! 3. For each parameter in declaration order: evaluate its dependency
//!    predicates ([`dependency`]) and, when active, collect a value through
//!    the prompt boundary ([`collector`])
//!
//! Parameters that are skipped - dependency unmet, deprecated, suppressed -
//! are absent from the resolved map; presence in the map is the contract for
//! "this value applies". The engine is strictly sequential and synchronous:
//! parameter N+1 may depend on parameter N's answer, so ordering is a
//! correctness requirement, not an implementation shortcut.

mod collector;
mod dependency;
mod requirements;
pub mod session;
mod variant;


use crate::prompt::Prompter;
use crate::providers::Collaborators;
use crate::template::{
    DeviceCategory, PARAM_INTERFACE, PARAM_USAGE, ResolvedConfig, Template, Value,
};
use anyhow::Result;
use tracing::debug;

pub use session::Session;

/// Resolves one template at a time against a session.
///
/// Holds the prompt boundary and the external collaborators; session state is
/// passed explicitly so a single session can span many resolutions. Must not
/// be used to resolve two templates concurrently against the same session.
pub struct Resolver<'a> {
    pub(crate) prompter: &'a mut dyn Prompter,
    pub(crate) collaborators: &'a mut Collaborators,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the given prompt boundary and collaborators.
    pub fn new(prompter: &'a mut dyn Prompter, collaborators: &'a mut Collaborators) -> Self {
        Self {
            prompter,
            collaborators,
        }
    }

    /// Resolve a template's parameters into a configuration map.
    ///
    /// # Errors
    ///
    /// Fails when a required requirement cannot be satisfied or the user
    /// aborts a required value; values collected up to that point are
    /// discarded by the caller.
    pub fn resolve(
        &mut self,
        session: &mut Session,
        template: &Template,
        category: DeviceCategory,
    ) -> Result<ResolvedConfig> {
        debug!(template = %template.template, %category, "resolving template");

        self.satisfy(session, &template.requirements)?;

        // Owned working copy: variant expansion must never touch the
        // registry's template definition.
        let mut working = template.params.clone();
        if let Some(catalog) = &template.variants {
            variant::expand(&mut working, catalog, self.prompter)?;
        }

        let mut resolved = ResolvedConfig::new();
        for index in 0..working.len() {
            let param = working[index].clone();

            if !dependency::is_active(&param, &resolved, &working) {
                continue;
            }

            match param.name.as_str() {
                // The variant expander already wrote this value; copy it
                // through verbatim.
                PARAM_INTERFACE => {
                    if !param.value.is_empty() {
                        resolved.insert(param.name.clone(), Value::String(param.value.clone()));
                    }
                }
                // The device category fixes the usage value; never prompt.
                PARAM_USAGE => {
                    if let Some(filter) = category.usage_filter() {
                        resolved.insert(PARAM_USAGE, Value::String(filter.to_string()));
                    }
                }
                _ => {
                    if let Some(value) = self.collect(session, &param)? {
                        resolved.insert(param.name.clone(), value);
                    }
                }
            }
        }

        debug!(
            template = %template.template,
            resolved = resolved.len(),
            "template resolved"
        );
        Ok(resolved)
    }
}
