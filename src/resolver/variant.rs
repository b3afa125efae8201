//! Variant expansion: turns the structural-variant parameter into concrete
//! sub-parameters before the main resolution pass.
//!
//! The canonical case is a communication-interface selector, declared under
//! the reserved `interface` name: it enumerates allowed keys, the template's
//! variant catalog maps each key to a description, a set of concrete
//! sub-parameters, and a defaults table. Keys without a catalog entry are
//! skipped; with a single configured key the choice prompt is bypassed
//! entirely.

use crate::prompt::Prompter;
use crate::template::{PARAM_INTERFACE, Param, VariantCatalog};
use anyhow::Result;
use tracing::debug;

/// Expand the reserved bus-interface parameter in `working`, if any.
///
/// On selection, the chosen key is written into the variant parameter's value
/// slot and the key's sub-parameters are injected right after it, with
/// defaults back-filled from the catalog. A template without an `interface`
/// parameter or without configured interfaces is left untouched.
pub(crate) fn expand(
    working: &mut Vec<Param>,
    catalog: &VariantCatalog,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let Some(variant_index) = working.iter().position(|p| p.name == PARAM_INTERFACE) else {
        return Ok(());
    };
    if catalog.is_empty() {
        return Ok(());
    }

    // Collect the keys that actually have a catalog entry, in choice order.
    let mut keys: Vec<String> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    for choice in &working[variant_index].choice {
        let Some(interface) = catalog.interfaces.get(choice) else {
            continue;
        };
        labels.push(if interface.description.is_empty() {
            choice.clone()
        } else {
            interface.description.clone()
        });
        keys.push(choice.clone());
    }

    if keys.is_empty() {
        return Ok(());
    }

    let index = if keys.len() == 1 {
        0
    } else {
        prompter.ask_choice("Select the communication interface", &labels)?
    };
    let key = keys.swap_remove(index);
    debug!(interface = %key, "expanding variant parameter");

    let interface = &catalog.interfaces[&key];
    let mut injected = interface.params.clone();
    for param in &mut injected {
        if param.default.is_empty() {
            if let Some(default) = interface.defaults.get(&param.name) {
                param.default = default.clone();
            }
        }
    }

    working[variant_index].value = key;
    working.splice(variant_index + 1..variant_index + 1, injected);

    Ok(())
}
