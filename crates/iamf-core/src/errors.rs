//! Structured error types shared across the suite crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SuiteError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, prefixes, patterns).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the test-vector suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SuiteError {
    /// Invalid run parameters: bad regex, missing paths, malformed section ids.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// The descriptor corpus could not be enumerated or is empty.
    #[error("corpus error: {0}")]
    Corpus(ErrorInfo),
    /// A single descriptor file could not be read or parsed.
    #[error("descriptor error: {0}")]
    Descriptor(ErrorInfo),
    /// The encoder collaborator could not be invoked.
    #[error("encoder error: {0}")]
    Encoder(ErrorInfo),
    /// Report tables could not be written.
    #[error("report error: {0}")]
    Report(ErrorInfo),
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

impl SuiteError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SuiteError::Config(info)
            | SuiteError::Corpus(info)
            | SuiteError::Descriptor(info)
            | SuiteError::Encoder(info)
            | SuiteError::Report(info)
            | SuiteError::Serde(info) => info,
        }
    }

    /// Returns true when the error signals a corpus without descriptor files.
    pub fn is_corpus_empty(&self) -> bool {
        matches!(self, SuiteError::Corpus(info) if info.code == CORPUS_EMPTY)
    }
}

/// Error code attached to [`SuiteError::Corpus`] when discovery finds no files.
pub const CORPUS_EMPTY: &str = "iamf_vectors.corpus_empty";
