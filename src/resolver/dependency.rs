//! Dependency evaluation: decides whether a parameter is active this round.
//!
//! Every dependency predicate references an earlier-declared parameter and is
//! evaluated against the values resolved so far; all predicates must hold.
//! When the referenced parameter has no resolved entry yet, the comparison
//! falls back to the referenced parameter's expander-written value or, failing
//! that, its template default - so downstream dependencies see author-provided
//! defaults even when a value was never explicitly collected.
//!
//! A dependency on a parameter absent from the working list never matches and
//! deactivates the parameter; templates are data, so this is not an error.

use crate::template::{DependencyCheck, Param, ResolvedConfig};
use tracing::trace;

/// Evaluate a parameter's dependency predicates against the values resolved
/// so far. Returns `true` when the parameter should be collected.
pub(crate) fn is_active(param: &Param, resolved: &ResolvedConfig, working: &[Param]) -> bool {
    for dep in &param.dependencies {
        let Some(referenced) = working.iter().find(|p| p.name == dep.name) else {
            trace!(
                param = %param.name,
                dependency = %dep.name,
                "dependency references unknown parameter, deactivating"
            );
            return false;
        };

        // Resolved value wins; otherwise compare against the referenced
        // parameter's own value slot or template default.
        let holds = match resolved.get(&dep.name) {
            // Only the empty string counts as empty: booleans and lists
            // never match `empty` and always match `notempty`.
            Some(value) => match dep.check {
                DependencyCheck::Empty => value.is_empty_string(),
                DependencyCheck::NotEmpty => !value.is_empty_string(),
                DependencyCheck::Equal => {
                    value.as_comparable().as_deref() == Some(dep.value.as_str())
                }
            },
            None => {
                let fallback = if referenced.value.is_empty() {
                    referenced.default.as_str()
                } else {
                    referenced.value.as_str()
                };
                match dep.check {
                    DependencyCheck::Empty => fallback.is_empty(),
                    DependencyCheck::NotEmpty => !fallback.is_empty(),
                    DependencyCheck::Equal => fallback == dep.value,
                }
            }
        };

        if !holds {
            trace!(
                param = %param.name,
                dependency = %dep.name,
                check = ?dep.check,
                "dependency not met, deactivating"
            );
            return false;
        }
    }

    true
}
