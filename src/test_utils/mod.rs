//! Test utilities: scripted prompt boundary and recording collaborators.
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite. Nothing here performs I/O; scripted answers drive the
//! resolver deterministically and call counters let tests assert how often
//! the external collaborators were invoked.

use crate::prompt::{Prompter, Question};
use crate::providers::{
    BrokerConfigurator, BrokerSettings, CertConfig, CertificateIssuer, Collaborators,
    SponsorshipValidator,
};
use crate::template::{Dependency, DependencyCheck, Param, ParamType, Template};
use anyhow::{Result, bail};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Prompter that replays scripted answers and records every prompt.
///
/// When a queue runs dry, `ask` falls back to the question's default, choices
/// fall back to index 0, and confirmations to `false` - so scripts only need
/// to list the answers a scenario actually cares about.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    choices: VecDeque<usize>,
    confirms: VecDeque<bool>,
    /// Labels of every single-value question asked, in order
    pub asked: Vec<String>,
    /// Number of `ask_choice` invocations
    pub choice_calls: usize,
    /// Number of `ask_yes_no` invocations
    pub confirm_calls: usize,
}

impl ScriptedPrompter {
    /// Empty script: every question answers with its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next `ask`.
    pub fn push_answer(&mut self, answer: impl Into<String>) -> &mut Self {
        self.answers.push_back(answer.into());
        self
    }

    /// Queue a selection index for the next `ask_choice`.
    pub fn push_choice(&mut self, index: usize) -> &mut Self {
        self.choices.push_back(index);
        self
    }

    /// Queue an answer for the next `ask_yes_no`.
    pub fn push_confirm(&mut self, answer: bool) -> &mut Self {
        self.confirms.push_back(answer);
        self
    }

    /// Number of `ask` invocations.
    #[must_use]
    pub fn ask_calls(&self) -> usize {
        self.asked.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question<'_>) -> Result<String> {
        self.asked.push(question.label.to_string());
        let answer = self
            .answers
            .pop_front()
            .unwrap_or_else(|| question.default.to_string());
        if answer.is_empty() && question.required {
            bail!("scripted prompter: no answer for required question '{}'", question.label);
        }
        Ok(answer)
    }

    fn ask_choice(&mut self, _label: &str, options: &[String]) -> Result<usize> {
        self.choice_calls += 1;
        let index = self.choices.pop_front().unwrap_or(0);
        if index >= options.len() {
            bail!("scripted prompter: choice index {index} out of range");
        }
        Ok(index)
    }

    fn ask_yes_no(&mut self, _label: &str) -> Result<bool> {
        self.confirm_calls += 1;
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}

/// Sponsorship validator that accepts or rejects every token and counts calls.
#[derive(Debug)]
pub struct RecordingSponsorship {
    accept: bool,
    calls: Rc<Cell<usize>>,
}

impl SponsorshipValidator for RecordingSponsorship {
    fn validate(&mut self, _token: &str) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.accept {
            Ok(())
        } else {
            bail!("token rejected")
        }
    }
}

/// Broker configurator that fails a fixed number of times, then succeeds.
#[derive(Debug)]
pub struct RecordingBroker {
    fail_times: usize,
    calls: Rc<Cell<usize>>,
}

impl BrokerConfigurator for RecordingBroker {
    fn configure(&mut self, _settings: &BrokerSettings) -> Result<()> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if call <= self.fail_times {
            bail!("broker unreachable")
        }
        Ok(())
    }
}

/// Certificate issuer returning fixed material.
#[derive(Debug)]
pub struct StaticCertIssuer {
    calls: Rc<Cell<usize>>,
}

impl CertificateIssuer for StaticCertIssuer {
    fn issue(&mut self) -> Result<CertConfig> {
        self.calls.set(self.calls.get() + 1);
        Ok(CertConfig {
            public: "test-cert".into(),
            private: "test-key".into(),
        })
    }
}

/// Per-collaborator call counters shared with a [`Collaborators`] bundle.
#[derive(Debug, Default)]
pub struct CollaboratorCalls {
    /// `validate` invocations
    pub sponsorship: Rc<Cell<usize>>,
    /// `configure` invocations
    pub broker: Rc<Cell<usize>>,
    /// `issue` invocations
    pub certificate: Rc<Cell<usize>>,
}

/// Build a collaborator bundle for tests.
///
/// `accept_sponsorship` controls token validation; `broker_failures` is the
/// number of broker attempts that fail before one succeeds. The returned
/// counters observe every call made through the bundle.
pub fn test_collaborators(
    accept_sponsorship: bool,
    broker_failures: usize,
) -> (Collaborators, CollaboratorCalls) {
    let calls = CollaboratorCalls::default();
    let collaborators = Collaborators {
        sponsorship: Box::new(RecordingSponsorship {
            accept: accept_sponsorship,
            calls: calls.sponsorship.clone(),
        }),
        broker: Box::new(RecordingBroker {
            fail_times: broker_failures,
            calls: calls.broker.clone(),
        }),
        certificate: Box::new(StaticCertIssuer {
            calls: calls.certificate.clone(),
        }),
    };
    (collaborators, calls)
}

/// String parameter with everything else defaulted.
#[must_use]
pub fn str_param(name: &str) -> Param {
    Param {
        name: name.to_string(),
        ..Param::default()
    }
}

/// String parameter with a template default.
#[must_use]
pub fn str_param_with_default(name: &str, default: &str) -> Param {
    Param {
        name: name.to_string(),
        default: default.to_string(),
        ..Param::default()
    }
}

/// Boolean parameter.
#[must_use]
pub fn bool_param(name: &str) -> Param {
    Param {
        name: name.to_string(),
        value_type: ParamType::Bool,
        ..Param::default()
    }
}

/// An `equal` dependency predicate.
#[must_use]
pub fn dep_equal(name: &str, value: &str) -> Dependency {
    Dependency {
        name: name.to_string(),
        check: DependencyCheck::Equal,
        value: value.to_string(),
    }
}

/// Meter template with the given parameters.
#[must_use]
pub fn meter_template(name: &str, params: Vec<Param>) -> Template {
    Template {
        template: name.to_string(),
        params,
        ..Template::default()
    }
}
