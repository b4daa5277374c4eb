//! Diagnostic severity.

use std::fmt;

/// How serious a diagnostic is.
///
/// Only the loader ever reports [`Severity::Error`]; extraction and
/// synthesis anomalies are always warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal error: the document cannot be read as a graph.
    ///
    /// No model is produced when an error is reported.
    Error,

    /// A recoverable modeling anomaly.
    ///
    /// The offending element is excluded from the model; generation
    /// still succeeds for everything else.
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
