//! External collaborator contracts.
//!
//! The requirement gate and the wizard orchestration depend on a handful of
//! side-effecting collaborators: validating a sponsorship token, configuring a
//! message broker, issuing a certificate, and testing a configured device.
//! Each is a trait so the engine never performs network I/O directly; the
//! binary wires up the built-in implementations from [`builtin`], tests inject
//! recording fakes.

pub mod builtin;

use crate::template::{DeviceCategory, ResolvedConfig, Template};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Message-broker connection settings collected by the requirement gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerSettings {
    /// Broker host name or address
    pub host: String,
    /// Broker port
    pub port: String,
    /// Optional user name
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub user: String,
    /// Optional password
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password: String,
}

impl BrokerSettings {
    /// `host:port` form used for connection attempts.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Certificate material produced by a [`CertificateIssuer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertConfig {
    /// Public certificate, PEM or an issuer-specific identifier
    pub public: String,
    /// Private key, PEM or an issuer-specific identifier
    pub private: String,
}

/// Outcome of a device validity test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// The device answered and the configuration works
    Valid,
    /// The test could not decide (e.g. offline tester)
    Inconclusive,
}

/// Validates a sponsorship token with the sponsorship backend.
pub trait SponsorshipValidator {
    /// Validate the token; `Err` means the token was rejected or the backend
    /// was unreachable.
    fn validate(&mut self, token: &str) -> Result<()>;
}

/// Configures and connection-tests a message broker.
pub trait BrokerConfigurator {
    /// Try to configure the broker with the given settings; `Err` means the
    /// broker was not reachable with these settings. The gate may call this
    /// again with corrected input.
    fn configure(&mut self, settings: &BrokerSettings) -> Result<()>;
}

/// Issues a device certificate.
pub trait CertificateIssuer {
    /// Issue a certificate for this installation.
    fn issue(&mut self) -> Result<CertConfig>;
}

/// Tests whether a resolved device configuration actually works.
///
/// Consulted by the wizard orchestration after resolution, never by the
/// resolution engine itself.
pub trait DeviceTester {
    /// Probe the device described by `values`.
    fn test(
        &mut self,
        category: DeviceCategory,
        template: &Template,
        values: &ResolvedConfig,
    ) -> Result<TestOutcome>;
}

/// Bundle of the collaborators the resolution engine needs.
pub struct Collaborators {
    /// Sponsorship token validation
    pub sponsorship: Box<dyn SponsorshipValidator>,
    /// Broker configuration and reachability test
    pub broker: Box<dyn BrokerConfigurator>,
    /// Certificate issuance
    pub certificate: Box<dyn CertificateIssuer>,
}

impl Collaborators {
    /// The built-in collaborators the binary runs with.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            sponsorship: Box::new(builtin::TokenFormatValidator::default()),
            broker: Box::new(builtin::TcpProbeBroker::default()),
            certificate: Box::new(builtin::LocalCertificateIssuer::default()),
        }
    }
}
