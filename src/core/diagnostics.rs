//! Structured sink for recoverable problems found during a run.
//!
//! Parse errors and validation errors never abort generation. They are pushed
//! into a [`Diagnostics`] collection, logged through `tracing` as they arrive,
//! and summarised at the end of the run.

use std::fmt;

use super::error::{ParseError, SourceLocation, ValidationError};

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// What produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A file could not be read or parsed
    Parse,
    /// An annotated declaration was malformed
    Validation,
}

/// One reported problem: `(severity, message, optional location)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {} ({})", self.severity, self.message, location),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::Parse,
            message: error.to_string(),
            location: Some(error.location),
        }
    }
}

impl From<ValidationError> for Diagnostic {
    fn from(error: ValidationError) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::Validation,
            message: error.to_string(),
            location: error.location,
        }
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file-scoped parse failure (logged at warn level).
    pub fn parse_error(&mut self, error: ParseError) {
        tracing::warn!("[portletgen] {}", error);
        self.entries.push(error.into());
    }

    /// Record a declaration-scoped validation failure (logged at error level).
    pub fn validation_error(&mut self, error: ValidationError) {
        match &error.location {
            Some(location) => tracing::error!("[portletgen] {} ({})", error, location),
            None => tracing::error!("[portletgen] {}", error),
        }
        self.entries.push(error.into());
    }

    /// Append another collection, keeping its order. Entries were already logged
    /// when first recorded, so nothing is logged again.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of the given kind.
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }
}
