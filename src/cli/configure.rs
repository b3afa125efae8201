//! The interactive wizard: add devices category by category and write the
//! resulting configuration document.
//!
//! This command owns everything the resolution engine deliberately does not:
//! category and template selection, the device validity test with its user
//! override, device naming, and the final YAML document. A rejected or
//! abandoned device discards its partially resolved values and gives its
//! device index back to the session.

use crate::core::WizardError;
use crate::prompt::{Prompter, TerminalPrompter};
use crate::providers::{
    BrokerSettings, CertConfig, Collaborators, DeviceTester, TestOutcome, builtin,
};
use crate::resolver::{Resolver, Session};
use crate::template::{DeviceCategory, Registry, ResolvedConfig, Value};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive configuration wizard.
#[derive(Args)]
pub struct ConfigureCommand {
    /// Also collect advanced parameters
    #[arg(long)]
    advanced: bool,

    /// File the device document is written to
    #[arg(short, long, default_value = "devices.yaml")]
    output: PathBuf,
}

impl Default for ConfigureCommand {
    fn default() -> Self {
        Self {
            advanced: false,
            output: PathBuf::from("devices.yaml"),
        }
    }
}

/// One configured device in the output document.
#[derive(Debug, Serialize)]
struct DeviceEntry {
    name: String,
    title: String,
    template: String,
    config: ResolvedConfig,
}

/// The persisted wizard result.
#[derive(Debug, Default, Serialize)]
struct ConfigDocument {
    devices: Vec<DeviceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    broker: Option<BrokerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    certificate: Option<CertConfig>,
}

impl ConfigureCommand {
    /// Execute the wizard against a loaded registry.
    pub fn execute(&self, registry: &Registry) -> Result<()> {
        let mut prompter = TerminalPrompter::new();
        let mut collaborators = Collaborators::builtin();
        let mut tester = builtin::OfflineDeviceTester;
        let mut session = Session::new(self.advanced);

        let document = run_wizard(
            registry,
            &mut session,
            &mut prompter,
            &mut collaborators,
            &mut tester,
        )?;

        if document.devices.is_empty() {
            println!("{}", "Nothing configured.".yellow());
            return Ok(());
        }

        let yaml = serde_yaml::to_string(&document)?;
        std::fs::write(&self.output, yaml)
            .with_context(|| format!("failed to write '{}'", self.output.display()))?;

        println!();
        println!(
            "{} {} device(s) written to {}",
            "✓".green().bold(),
            document.devices.len(),
            self.output.display()
        );
        Ok(())
    }
}

/// Main wizard loop, separated from terminal wiring for testability.
fn run_wizard(
    registry: &Registry,
    session: &mut Session,
    prompter: &mut dyn Prompter,
    collaborators: &mut Collaborators,
    tester: &mut dyn DeviceTester,
) -> Result<ConfigDocument> {
    let mut document = ConfigDocument::default();

    loop {
        let mut options: Vec<String> = DeviceCategory::ALL
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        options.push("Done".to_string());

        let index = prompter.ask_choice("What would you like to configure?", &options)?;
        if index == options.len() - 1 {
            break;
        }
        let category = DeviceCategory::ALL[index];

        match add_device(registry, session, prompter, collaborators, tester, category) {
            Ok(device) => {
                println!(
                    "{} {} '{}' added",
                    "✓".green().bold(),
                    category,
                    device.name
                );
                document.devices.push(device);
            }
            // Backing out of a device is normal control flow, not a wizard
            // failure; anything else propagates.
            Err(e) if is_recoverable(&e) => {
                println!("{} {e:#}", "skipped:".yellow());
            }
            Err(e) => return Err(e),
        }
    }

    document.broker = session.broker.clone();
    document.certificate = session.certificate.clone();
    Ok(document)
}

/// Select and resolve one device of the given category.
fn add_device(
    registry: &Registry,
    session: &mut Session,
    prompter: &mut dyn Prompter,
    collaborators: &mut Collaborators,
    tester: &mut dyn DeviceTester,
    category: DeviceCategory,
) -> Result<DeviceEntry> {
    let items = registry.for_category(category);
    if items.is_empty() {
        return Err(WizardError::TemplateNotFound {
            name: category.to_string(),
        })
        .with_context(|| format!("no templates available for category '{category}'"));
    }

    let titles: Vec<String> = items
        .iter()
        .map(|t| {
            if t.group.is_empty() {
                t.title().to_string()
            } else {
                format!("{} [{}]", t.title(), t.group)
            }
        })
        .collect();
    let index = prompter.ask_choice(&format!("Select the {category}"), &titles)?;
    let template = items[index];

    let values = Resolver::new(prompter, collaborators).resolve(session, template, category)?;

    let name = format!("{}{}", category.default_name(), session.next_device_index());

    println!();
    println!("Testing {} ...", template.title());
    match tester.test(category, template, &values) {
        Ok(TestOutcome::Valid) => println!("  {}", "device is working".green()),
        Ok(TestOutcome::Inconclusive) => {
            println!("  {}", "device could not be verified, keeping it".yellow());
        }
        Err(e) => {
            println!("  {}: {e:#}", "test failed".red());
            if !prompter.ask_yes_no(&format!("Add {} anyway?", template.title()))? {
                session.rollback_device_index();
                return Err(WizardError::DeviceNotValid { name }.into());
            }
        }
    }

    // A collected `title` value overrides the template title.
    let title = match values.get("title") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => template.title().to_string(),
    };

    debug!(device = %name, template = %template.template, "device added");
    Ok(DeviceEntry {
        name,
        title,
        template: template.template.clone(),
        config: values,
    })
}

/// Whether an error is a per-device back-out rather than a wizard failure.
fn is_recoverable(error: &anyhow::Error) -> bool {
    error.chain().any(|c| {
        matches!(
            c.downcast_ref::<WizardError>(),
            Some(
                WizardError::Aborted
                    | WizardError::DeviceNotValid { .. }
                    | WizardError::RequirementUnsatisfied { .. }
                    | WizardError::TemplateNotFound { .. }
            )
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Param, ParamType, Template};
    use crate::test_utils::{ScriptedPrompter, test_collaborators};

    struct FailingTester;

    impl DeviceTester for FailingTester {
        fn test(
            &mut self,
            _category: DeviceCategory,
            _template: &Template,
            _values: &ResolvedConfig,
        ) -> anyhow::Result<TestOutcome> {
            anyhow::bail!("connection refused")
        }
    }

    fn pv_registry() -> Registry {
        Registry::new(vec![Template {
            template: "generic-pv".into(),
            title: "Generic PV".into(),
            params: vec![
                Param {
                    name: "usage".into(),
                    value_type: ParamType::Choice,
                    choice: vec!["pv".into()],
                    ..Param::default()
                },
                Param {
                    name: "host".into(),
                    required: true,
                    ..Param::default()
                },
            ],
            ..Template::default()
        }])
    }

    #[test]
    fn test_wizard_adds_device_and_finishes() {
        let registry = pv_registry();
        let mut session = Session::new(false);
        let (mut collaborators, _) = test_collaborators(true, 0);
        let mut tester = builtin::OfflineDeviceTester;

        let mut prompter = ScriptedPrompter::new();
        prompter.push_choice(1); // PV meter category
        prompter.push_choice(0); // Generic PV template
        prompter.push_answer("192.168.1.10"); // host
        prompter.push_choice(5); // Done

        let document = run_wizard(
            &registry,
            &mut session,
            &mut prompter,
            &mut collaborators,
            &mut tester,
        )
        .unwrap();

        assert_eq!(document.devices.len(), 1);
        let device = &document.devices[0];
        assert_eq!(device.name, "pv1");
        assert_eq!(device.title, "Generic PV");
        assert_eq!(device.config.get("usage"), Some(&Value::String("pv".into())));
    }

    #[test]
    fn test_rejected_device_rolls_back_index() {
        let registry = pv_registry();
        let mut session = Session::new(false);
        let (mut collaborators, _) = test_collaborators(true, 0);
        let mut tester = FailingTester;

        let mut prompter = ScriptedPrompter::new();
        prompter.push_choice(1); // PV meter
        prompter.push_choice(0); // template
        prompter.push_answer("192.168.1.10");
        prompter.push_confirm(false); // do not keep the failing device
        prompter.push_choice(5); // Done

        let document = run_wizard(
            &registry,
            &mut session,
            &mut prompter,
            &mut collaborators,
            &mut tester,
        )
        .unwrap();

        assert!(document.devices.is_empty());
        assert_eq!(session.device_index(), 0);
    }

    #[test]
    fn test_kept_failing_device_is_added() {
        let registry = pv_registry();
        let mut session = Session::new(false);
        let (mut collaborators, _) = test_collaborators(true, 0);
        let mut tester = FailingTester;

        let mut prompter = ScriptedPrompter::new();
        prompter.push_choice(1);
        prompter.push_choice(0);
        prompter.push_answer("192.168.1.10");
        prompter.push_confirm(true); // keep it anyway
        prompter.push_choice(5); // Done

        let document = run_wizard(
            &registry,
            &mut session,
            &mut prompter,
            &mut collaborators,
            &mut tester,
        )
        .unwrap();

        assert_eq!(document.devices.len(), 1);
        assert_eq!(session.device_index(), 1);
    }
}
