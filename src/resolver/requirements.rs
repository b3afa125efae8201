//! The requirement gate: satisfies a template's or parameter's external
//! capability requirements.
//!
//! Each [`RequirementTag`] is fulfilled at most once per session; a second
//! request for an already-satisfied tag is a no-op. Broker configuration
//! loops, re-prompting for corrected settings, until success or explicit user
//! abandonment. Sponsorship validation failures may be overridden by the user;
//! everything else propagates as [`WizardError::RequirementUnsatisfied`]
//! naming the failing tag.

use super::Resolver;
use crate::core::WizardError;
use crate::prompt::Question;
use crate::providers::BrokerSettings;
use crate::resolver::Session;
use crate::template::{RequirementTag, Requirements};
use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{debug, warn};

impl Resolver<'_> {
    /// Satisfy every tag of a requirements block, skipping tags already
    /// satisfied this session.
    pub fn satisfy(&mut self, session: &mut Session, requirements: &Requirements) -> Result<()> {
        if !requirements.description.is_empty() {
            println!();
            println!("{}", "-------------------------------------------------".dimmed());
            println!("{}", "Requirements:".bold());
            println!("{}", requirements.description);
            if !requirements.uri.is_empty() {
                println!("  More information: {}", requirements.uri.underline());
            }
            println!("{}", "-------------------------------------------------".dimmed());
        }

        for &tag in &requirements.tags {
            if session.is_satisfied(tag) {
                debug!(%tag, "requirement already satisfied this session");
                continue;
            }
            match tag {
                RequirementTag::Sponsorship => self.satisfy_sponsorship(session)?,
                RequirementTag::Broker => self.satisfy_broker(session)?,
                RequirementTag::Certificate => self.satisfy_certificate(session)?,
            }
            session.mark_satisfied(tag);
        }

        Ok(())
    }

    /// Ask for and validate a sponsorship token.
    ///
    /// Declining the token question aborts; a rejected token may be kept after
    /// an explicit user override.
    fn satisfy_sponsorship(&mut self, session: &mut Session) -> Result<()> {
        println!();
        println!("{}", "-- Sponsorship -----------------------------".dimmed());
        println!("This device requires a sponsorship token.");

        if !self.prompter.ask_yes_no("Do you have a sponsorship token?")? {
            return Err(WizardError::RequirementUnsatisfied {
                tag: RequirementTag::Sponsorship,
            }
            .into());
        }

        let token = self.prompter.ask(&Question {
            label: "Sponsorship token",
            mask: true,
            required: true,
            ..Question::default()
        })?;

        if let Err(e) = self.collaborators.sponsorship.validate(&token) {
            warn!(error = %e, "sponsorship token validation failed");
            println!("  {}: {e}", "validation failed".red());
            if !self.prompter.ask_yes_no("Keep the token anyway?")? {
                return Err(WizardError::RequirementUnsatisfied {
                    tag: RequirementTag::Sponsorship,
                })
                .context(e);
            }
        }

        session.sponsor_token = Some(token);
        Ok(())
    }

    /// Collect broker settings and test them, retrying on failure until the
    /// user gives up.
    fn satisfy_broker(&mut self, session: &mut Session) -> Result<()> {
        println!();
        println!("{}", "-- Message broker --------------------------".dimmed());

        loop {
            let host = self.prompter.ask(&Question {
                label: "Broker host",
                required: true,
                ..Question::default()
            })?;
            let port = self.prompter.ask(&Question {
                label: "Broker port",
                default: "1883",
                required: true,
                ..Question::default()
            })?;
            let user = self.prompter.ask(&Question {
                label: "Broker user (optional)",
                ..Question::default()
            })?;
            let password = self.prompter.ask(&Question {
                label: "Broker password (optional)",
                mask: true,
                ..Question::default()
            })?;

            let settings = BrokerSettings {
                host,
                port,
                user,
                password,
            };

            match self.collaborators.broker.configure(&settings) {
                Ok(()) => {
                    session.broker = Some(settings);
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "broker configuration failed");
                    println!("  {}: {e}", "broker test failed".red());
                    if !self
                        .prompter
                        .ask_yes_no("Try again with different settings?")?
                    {
                        return Err(WizardError::RequirementUnsatisfied {
                            tag: RequirementTag::Broker,
                        })
                        .context(e);
                    }
                }
            }
        }
    }

    /// Issue a certificate through the external issuer.
    fn satisfy_certificate(&mut self, session: &mut Session) -> Result<()> {
        println!();
        println!("{}", "-- Certificate -----------------------------".dimmed());

        match self.collaborators.certificate.issue() {
            Ok(cert) => {
                session.certificate = Some(cert);
                Ok(())
            }
            Err(e) => Err(WizardError::RequirementUnsatisfied {
                tag: RequirementTag::Certificate,
            })
            .context(e),
        }
    }
}
