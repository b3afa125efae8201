//! List the templates available per device category.
//!
//! Non-interactive companion to `configure`: prints, for each category, the
//! templates the wizard would offer, in the same order.

use crate::template::{DeviceCategory, Registry};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Print available templates per device category.
#[derive(Args)]
pub struct ListCommand {
    /// Also show the template identifiers
    #[arg(long)]
    ids: bool,
}

impl ListCommand {
    /// Execute the list command against a loaded registry.
    pub fn execute(&self, registry: &Registry) -> Result<()> {
        for category in DeviceCategory::ALL {
            let items = registry.for_category(category);
            println!("{} ({})", category.label().bold(), items.len());
            for template in items {
                let mut line = format!("  {}", template.title());
                if !template.group.is_empty() {
                    line.push_str(&format!(" [{}]", template.group));
                }
                if self.ids {
                    line.push_str(&format!(" ({})", template.template.dimmed()));
                }
                println!("{line}");
            }
            println!();
        }
        Ok(())
    }
}
