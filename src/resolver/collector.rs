//! Value collection: obtains one value (or a list of values) for an active
//! parameter through the prompt boundary.
//!
//! Visibility suppression happens before any prompt: deprecated parameters
//! are never collected, advanced parameters only in advanced mode, and hidden
//! parameters with a non-empty default resolve to that default silently.
//! Boolean parameters that resolve to `true` while carrying a requirement tag
//! degrade to `false` when the requirement cannot be satisfied - a capability
//! the user cannot unlock is simply "off", not an error.

use super::Resolver;
use crate::prompt::Question;
use crate::resolver::Session;
use crate::template::{Param, ParamType, RequirementTag, Value};
use anyhow::Result;
use colored::Colorize;
use tracing::debug;

/// Notice appended to the help text of parameters that need a sponsorship.
const SPONSORSHIP_NOTICE: &str = "This feature requires a sponsorship token.";

impl Resolver<'_> {
    /// Collect a value for an active parameter, or `None` when the parameter
    /// is suppressed or resolves to nothing.
    pub(crate) fn collect(
        &mut self,
        session: &mut Session,
        param: &Param,
    ) -> Result<Option<Value>> {
        if param.deprecated {
            debug!(param = %param.name, "skipping deprecated parameter");
            return Ok(None);
        }
        if param.advanced && !session.advanced {
            debug!(param = %param.name, "skipping advanced parameter");
            return Ok(None);
        }
        if param.hidden && !param.default.is_empty() {
            return Ok(Some(Value::from_raw(param.value_type, &param.default)));
        }
        // Variant parameters are structural: the expander keys on the
        // reserved `interface` name, so one under any other name stays inert.
        if param.value_type == ParamType::Variant {
            debug!(param = %param.name, "skipping unexpanded variant parameter");
            return Ok(None);
        }

        match param.value_type {
            ParamType::StringList => {
                let values = self.collect_list(session, param)?;
                if values.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::List(values)))
                }
            }
            _ => {
                let raw = self.collect_single(session, param)?;
                if raw.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::from_raw(param.value_type, &raw)))
                }
            }
        }
    }

    /// Collect one raw value for a parameter.
    fn collect_single(&mut self, session: &mut Session, param: &Param) -> Result<String> {
        let mut help = param.help.clone();
        if param.requirements.has(RequirementTag::Sponsorship) {
            if !help.is_empty() {
                help.push_str("\n\n");
            }
            help.push_str(SPONSORSHIP_NOTICE);
        }

        if param.value_type == ParamType::Bool {
            if !help.is_empty() {
                println!("{}", help.dimmed());
            }
            let mut value = self.prompter.ask_yes_no(param.label())?;

            // A boolean capability the user can't unlock degrades to "off".
            if value
                && !param.requirements.tags.is_empty()
                && self.satisfy(session, &param.requirements).is_err()
            {
                debug!(param = %param.name, "requirement unsatisfied, forcing value to false");
                value = false;
            }
            return Ok(value.to_string());
        }

        // Choice parameters fall back to their choice list for validation.
        let valid_values: &[String] = if !param.valid_values.is_empty() {
            &param.valid_values
        } else if param.value_type == ParamType::Choice {
            &param.choice
        } else {
            &[]
        };

        self.prompter.ask(&Question {
            label: param.label(),
            default: &param.default,
            example: &param.example,
            help: &help,
            valid_values,
            mask: param.mask,
            required: param.required,
        })
    }

    /// Collect list values until an empty value is entered or the user
    /// declines to add another; only non-empty entries are kept.
    fn collect_list(&mut self, session: &mut Session, param: &Param) -> Result<Vec<String>> {
        let mut values = Vec::new();

        loop {
            let value = self.collect_single(session, param)?;
            if value.is_empty() {
                break;
            }
            values.push(value);

            if !self.prompter.ask_yes_no("Add another value?")? {
                break;
            }
        }

        Ok(values)
    }
}
