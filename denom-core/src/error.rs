//! Conversion errors and their structured form
//!
//! `ConversionError` is what the engine returns. `DenomError` is the
//! serializable shape handed to hosts, with a machine code and a hint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two ways a conversion can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Input does not match the decimal-number grammar
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// Unit is not a member of the active domain
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

impl ConversionError {
    /// User-input problem, as opposed to a configuration fault
    pub fn is_user_error(&self) -> bool {
        matches!(self, ConversionError::InvalidNumber(_))
    }
}

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_DOMAIN: &str = "UNKNOWN_DOMAIN";
    pub const INVALID_PARAMS: &str = "INVALID_PARAMS";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Bad input; the user must change it
    Error,
    /// Misconfigured caller or domain
    Fatal,
}

/// Where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unit field the input was typed into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Raw input that was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

/// Structured error for hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenomError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    pub severity: Severity,
}

impl DenomError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set unit context
    pub fn in_unit(mut self, unit: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.unit = Some(unit.into());
        self
    }

    /// Builder: set input context
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.input = Some(input.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_number(input: &str) -> Self {
        Self::new(codes::INVALID_NUMBER, format!("Invalid number: {:?}", input))
            .with_suggestion("Use digits with an optional leading '-' and at most one '.', e.g. -12.5")
            .with_input(input)
    }

    pub fn unknown_unit(unit: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", unit))
            .with_suggestion("Use list_units to see the units of the domain")
            .with_severity(Severity::Fatal)
    }

    pub fn unknown_domain(name: &str) -> Self {
        Self::new(codes::UNKNOWN_DOMAIN, format!("Unknown domain: {}", name))
            .with_suggestion("Use list_domains to see the available domains")
            .with_severity(Severity::Fatal)
    }

    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMS, format!("Invalid parameters: {}", details.into()))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for DenomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for DenomError {}

impl From<ConversionError> for DenomError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidNumber(s) => Self::invalid_number(&s),
            ConversionError::UnknownUnit(u) => Self::unknown_unit(&u),
        }
    }
}
