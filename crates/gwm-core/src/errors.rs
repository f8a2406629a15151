//! Structured error types shared across GWM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`WaveError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (modes, lengths, thresholds, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for waveform handling.
///
/// Errors are raised at the point of detection and propagated unchanged; none
/// of the families describes a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum WaveError {
    /// Metadata or waveform invariants were violated.
    #[error("validation error: {0}")]
    Validation(ErrorInfo),
    /// A requested `(l, m)` mode is not available.
    #[error("mode not found: {0}")]
    ModeNotFound(ErrorInfo),
    /// No part of a signal lies above a requested frequency floor.
    #[error("signal window error: {0}")]
    SignalWindow(ErrorInfo),
    /// Unknown model, PSD or other named configuration entry.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl WaveError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            WaveError::Validation(info)
            | WaveError::ModeNotFound(info)
            | WaveError::SignalWindow(info)
            | WaveError::Configuration(info)
            | WaveError::Serde(info) => info,
        }
    }

    /// Shorthand for a validation error without context.
    pub fn validation(code: &str, message: impl Into<String>) -> Self {
        WaveError::Validation(ErrorInfo::new(code, message))
    }

    /// Shorthand for a configuration error without context.
    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        WaveError::Configuration(ErrorInfo::new(code, message))
    }

    /// Shorthand for a serialization error wrapping a foreign error.
    pub fn serde(code: &str, err: impl ToString) -> Self {
        WaveError::Serde(ErrorInfo::new(code, err.to_string()))
    }
}
