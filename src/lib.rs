//! devwiz - Interactive device-configuration wizard
//!
//! A terminal wizard that turns declarative device *templates* into a
//! consistent, ready-to-persist configuration document. Templates declare
//! typed parameters, dependencies between them, external requirements
//! (sponsorship, message broker, certificate) and structural variants such as
//! bus-interface choices; the wizard resolves all of that interactively, one
//! device at a time.
//!
//! # Architecture Overview
//!
//! The crate follows a template/resolver model:
//! - Templates are authored as YAML files and loaded into a [`template::Registry`]
//! - The [`resolver`] walks a template's parameter list in declaration order,
//!   gating each parameter on its requirements and dependency predicates and
//!   collecting values through the prompt boundary
//! - The resolved configuration map is serialized to YAML by the CLI layer
//!
//! ## Key Properties
//!
//! - **Declaration order matters**: a parameter may only depend on parameters
//!   declared before it; resolution is a single forward pass
//! - **Requirements are satisfied once**: sponsorship checks, broker setup and
//!   certificate issuance run at most once per wizard session
//! - **Templates are data**: structural inconsistencies in externally authored
//!   templates degrade to "condition not met" instead of hard failures
//! - **No hidden I/O**: every prompt and every external side effect goes
//!   through an injectable trait, so the whole engine is testable offline
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface and wizard orchestration
//! - [`core`] - Error taxonomy and user-friendly error reporting
//! - [`template`] - Template data model, value model, and registry
//! - [`resolver`] - The parameter-resolution engine (requirement gate,
//!   dependency evaluator, variant expander, value collector, session state)
//! - [`prompt`] - The prompt boundary trait and its terminal implementation
//! - [`providers`] - External collaborator contracts (sponsorship validator,
//!   broker configurator, certificate issuer, device tester)
//!
//! # Template Format
//!
//! ```yaml
//! template: sma-inverter
//! title: SMA Inverter
//! class: meter
//! params:
//!   - name: usage
//!     type: choice
//!     choice: [pv, battery]
//!   - name: host
//!     required: true
//!   - name: port
//!     default: "502"
//!   - name: capacity
//!     advanced: true
//!     dependencies:
//!       - name: usage
//!         check: equal
//!         value: battery
//! ```

// Core functionality modules
pub mod cli;
pub mod core;
pub mod resolver;
pub mod template;

// Collaborator boundaries
pub mod prompt;
pub mod providers;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
