//! Core types and error handling for devwiz.
//!
//! This module hosts the error taxonomy shared by the whole crate:
//! - [`WizardError`] - enumerated, typed error cases for resolution failures
//! - [`ErrorContext`] - wrapper adding user-friendly messages and suggestions
//!   for terminal display
//!
//! Typed errors are used wherever the caller makes a control-flow decision on
//! the failure kind (a declined sponsorship aborts a parameter, a declined
//! device test rolls back a device); everything else travels as
//! [`anyhow::Error`] with context.

pub mod error;

pub use error::{ErrorContext, WizardError, user_friendly_error};
