//! Built-in collaborator implementations wired up by the binary.
//!
//! These are intentionally modest: the wizard's contract is only
//! success/failure per collaborator, and installations with a real
//! sponsorship backend or PKI replace these through the trait boundary.

use super::{
    BrokerConfigurator, BrokerSettings, CertConfig, CertificateIssuer, DeviceCategory,
    DeviceTester, ResolvedConfig, SponsorshipValidator, Template, TestOutcome,
};
use anyhow::{Result, bail};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, warn};

/// Offline sponsorship check: accepts any plausibly-shaped token.
///
/// Real deployments replace this with a backend call; here we only reject
/// tokens that cannot possibly be valid.
#[derive(Debug, Default)]
pub struct TokenFormatValidator;

impl SponsorshipValidator for TokenFormatValidator {
    fn validate(&mut self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            bail!("sponsorship token is empty");
        }
        if token.len() < 16 || token.contains(char::is_whitespace) {
            bail!("sponsorship token is malformed");
        }
        warn!("sponsorship token accepted without online validation");
        Ok(())
    }
}

/// Broker configurator that probes the broker with a TCP connect.
#[derive(Debug)]
pub struct TcpProbeBroker {
    timeout: Duration,
}

impl Default for TcpProbeBroker {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
        }
    }
}

impl BrokerConfigurator for TcpProbeBroker {
    fn configure(&mut self, settings: &BrokerSettings) -> Result<()> {
        let address = settings.address();
        debug!(%address, "probing message broker");

        let mut addrs = address
            .to_socket_addrs()
            .map_err(|e| anyhow::anyhow!("cannot resolve broker address '{address}': {e}"))?;
        let addr = addrs
            .next()
            .ok_or_else(|| anyhow::anyhow!("broker address '{address}' resolved to nothing"))?;

        TcpStream::connect_timeout(&addr, self.timeout)
            .map_err(|e| anyhow::anyhow!("broker '{address}' not reachable: {e}"))?;
        Ok(())
    }
}

/// Certificate issuer producing locally generated placeholder material.
///
/// Installations with a real PKI replace this; the identifiers are unique per
/// issuance so the rest of the configuration can reference them.
#[derive(Debug, Default)]
pub struct LocalCertificateIssuer;

impl CertificateIssuer for LocalCertificateIssuer {
    fn issue(&mut self) -> Result<CertConfig> {
        let ski = uuid::Uuid::new_v4();
        Ok(CertConfig {
            public: format!("local-cert-{ski}"),
            private: format!("local-key-{ski}"),
        })
    }
}

/// Device tester used when no probing backend is available.
///
/// Reports [`TestOutcome::Inconclusive`] so the wizard asks the user whether
/// to keep the device instead of pretending the test passed.
#[derive(Debug, Default)]
pub struct OfflineDeviceTester;

impl DeviceTester for OfflineDeviceTester {
    fn test(
        &mut self,
        category: DeviceCategory,
        template: &Template,
        _values: &ResolvedConfig,
    ) -> Result<TestOutcome> {
        debug!(category = %category, template = %template.template, "no test backend, reporting inconclusive");
        Ok(TestOutcome::Inconclusive)
    }
}
