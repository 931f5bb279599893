//! Severity levels for extraction diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Neither level stops an extraction; fatal conditions are reported as
/// [`ExtractError`](crate::extract::ExtractError) instead. An artifact whose
/// extraction carries an [`Severity::Error`] diagnostic still produces a
/// fragment but counts as failed in batch totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The fragment was produced but is likely wrong.
    Error,

    /// The fragment was produced with a fallback value.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
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
