//! Error handling for devwiz
//!
//! The error system is built around two types:
//! - [`WizardError`] - strongly-typed error cases for precise handling in code
//! - [`ErrorContext`] - wrapper that adds user-friendly messages and
//!   suggestions for CLI display
//!
//! # Error Categories
//!
//! - **Requirements**: [`WizardError::RequirementUnsatisfied`] - an external
//!   capability (sponsorship, broker, certificate) was declined or failed
//! - **User flow**: [`WizardError::Aborted`], [`WizardError::DeviceNotValid`] -
//!   the user backed out of a selection or rejected an invalid device
//! - **Templates**: [`WizardError::TemplateParse`],
//!   [`WizardError::TemplateNotFound`] - externally authored template data
//!   could not be loaded
//! - **I/O and encoding**: [`WizardError::Io`], [`WizardError::Yaml`] -
//!   automatic conversions from [`std::io::Error`] and [`serde_yaml::Error`]
//!
//! Structural inconsistencies *inside* a template (a dependency referencing an
//! unknown parameter, a variant key without a catalog entry) are deliberately
//! not errors: templates are data, and the resolver degrades those cases to
//! "condition not met".
//!
//! Use [`user_friendly_error`] at the binary boundary to turn any error into a
//! colored message with a suggestion.

use crate::template::RequirementTag;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for wizard operations.
///
/// Each variant carries enough context to name the offending parameter,
/// requirement, or file in the message shown to the user.
#[derive(Error, Debug)]
pub enum WizardError {
    /// An external requirement could not be satisfied for this session.
    ///
    /// Raised by the requirement gate when the user declines a capability or
    /// the external collaborator fails without a user override.
    #[error("requirement '{tag}' could not be satisfied")]
    RequirementUnsatisfied {
        /// The requirement tag that failed
        tag: RequirementTag,
    },

    /// The user backed out of a selection or declined to continue.
    #[error("aborted by user")]
    Aborted,

    /// The device test failed and the user chose not to keep the device.
    #[error("device '{name}' did not pass the validity test")]
    DeviceNotValid {
        /// Name assigned to the rejected device
        name: String,
    },

    /// A template file exists but could not be parsed.
    #[error("failed to parse template '{path}': {reason}")]
    TemplateParse {
        /// Path of the offending template file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// No template with the given name is known to the registry.
    #[error("template '{name}' not found")]
    TemplateNotFound {
        /// Requested template name
        name: String,
    },

    /// Reading or answering a prompt failed (terminal closed, not a tty, ...).
    #[error("prompt failed: {reason}")]
    Prompt {
        /// Underlying prompt failure
        reason: String,
    },

    /// I/O error from [`std::io::Error`]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error from [`serde_yaml::Error`]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with a custom message
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error wrapper that adds user-friendly context to a [`WizardError`].
///
/// Suggestions are displayed in green, details in yellow, the error itself in
/// red. Use the builder methods to attach information worth showing the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying wizard error
    pub error: WizardError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: WizardError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details about the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`] for CLI display.
///
/// Recognizes [`WizardError`] variants anywhere in the error chain and
/// attaches the matching suggestion; everything else falls through to a
/// generic message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Walk the chain so errors wrapped by anyhow context are still recognized.
    let mut current: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(wizard_error) = current.downcast_ref::<WizardError>() {
            return create_error_context(wizard_error);
        }
        match current.source() {
            Some(source) => current = source,
            None => break,
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let details = format!("IO error: {io_error}");
        return ErrorContext::new(WizardError::Other {
            message: error.to_string(),
        })
        .with_suggestion("Check that the path exists and you have the necessary permissions")
        .with_details(details);
    }

    ErrorContext::new(WizardError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: &WizardError) -> ErrorContext {
    let suggestion: Option<&str> = match error {
        WizardError::RequirementUnsatisfied { tag } => Some(match tag {
            RequirementTag::Sponsorship => {
                "This device needs a valid sponsorship token; obtain one and re-run the wizard"
            }
            RequirementTag::Broker => {
                "Check that the message broker is running and reachable, then retry"
            }
            RequirementTag::Certificate => {
                "Certificate issuance failed; check the certificate provider configuration"
            }
        }),
        WizardError::Aborted => None,
        WizardError::DeviceNotValid { .. } => {
            Some("Verify the connection settings and run the wizard again")
        }
        WizardError::TemplateParse { .. } => {
            Some("Fix the template YAML or remove the file from the template directory")
        }
        WizardError::TemplateNotFound { .. } => {
            Some("Run 'devwiz list' to see the templates available for each category")
        }
        WizardError::Prompt { .. } => Some("devwiz needs an interactive terminal; run it from a tty"),
        WizardError::Io(_) | WizardError::Yaml(_) | WizardError::Other { .. } => None,
    };

    let mut ctx = ErrorContext::new(match error {
        WizardError::RequirementUnsatisfied { tag } => {
            WizardError::RequirementUnsatisfied { tag: *tag }
        }
        WizardError::Aborted => WizardError::Aborted,
        WizardError::DeviceNotValid { name } => WizardError::DeviceNotValid { name: name.clone() },
        WizardError::TemplateParse { path, reason } => WizardError::TemplateParse {
            path: path.clone(),
            reason: reason.clone(),
        },
        WizardError::TemplateNotFound { name } => {
            WizardError::TemplateNotFound { name: name.clone() }
        }
        WizardError::Prompt { reason } => WizardError::Prompt {
            reason: reason.clone(),
        },
        other => WizardError::Other {
            message: other.to_string(),
        },
    });
    if let Some(s) = suggestion {
        ctx = ctx.with_suggestion(s);
    }
    ctx
}
