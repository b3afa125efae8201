//! Per-wizard-run session state.
//!
//! The session carries everything that outlives a single template resolution:
//! advanced mode, which requirement tags have already been satisfied, the
//! device-index counter used for default naming, and the broker/certificate
//! settings captured by the requirement gate. It is created at wizard start,
//! threaded explicitly through every component, and discarded at exit - never
//! persisted, never global.

use crate::providers::{BrokerSettings, CertConfig};
use crate::template::RequirementTag;
use std::collections::BTreeSet;

/// Mutable wizard-session state.
#[derive(Debug, Default)]
pub struct Session {
    /// Collect advanced parameters too
    pub advanced: bool,
    /// Sponsorship token captured by the requirement gate
    pub sponsor_token: Option<String>,
    /// Broker settings captured by the requirement gate
    pub broker: Option<BrokerSettings>,
    /// Certificate material captured by the requirement gate
    pub certificate: Option<CertConfig>,
    satisfied: BTreeSet<RequirementTag>,
    device_index: usize,
}

impl Session {
    /// Create a fresh session.
    #[must_use]
    pub fn new(advanced: bool) -> Self {
        Self {
            advanced,
            ..Self::default()
        }
    }

    /// Whether a requirement tag has already been satisfied this session.
    #[must_use]
    pub fn is_satisfied(&self, tag: RequirementTag) -> bool {
        self.satisfied.contains(&tag)
    }

    /// Mark a requirement tag as satisfied for the rest of the session.
    pub fn mark_satisfied(&mut self, tag: RequirementTag) {
        self.satisfied.insert(tag);
    }

    /// Claim the next device index (1-based).
    pub fn next_device_index(&mut self) -> usize {
        self.device_index += 1;
        self.device_index
    }

    /// Give back the most recently claimed device index after an abandoned
    /// device addition.
    pub fn rollback_device_index(&mut self) {
        self.device_index = self.device_index.saturating_sub(1);
    }

    /// Currently claimed device count.
    #[must_use]
    pub fn device_index(&self) -> usize {
        self.device_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_tags_satisfied_once() {
        let mut session = Session::new(false);
        assert!(!session.is_satisfied(RequirementTag::Broker));
        session.mark_satisfied(RequirementTag::Broker);
        assert!(session.is_satisfied(RequirementTag::Broker));
        assert!(!session.is_satisfied(RequirementTag::Sponsorship));
    }

    #[test]
    fn test_device_index_rollback() {
        let mut session = Session::new(false);
        assert_eq!(session.next_device_index(), 1);
        assert_eq!(session.next_device_index(), 2);
        session.rollback_device_index();
        assert_eq!(session.next_device_index(), 2);
        // rollback never goes below zero
        let mut fresh = Session::new(false);
        fresh.rollback_device_index();
        assert_eq!(fresh.next_device_index(), 1);
    }
}
