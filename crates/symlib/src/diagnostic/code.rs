//! Stable codes for extraction diagnostics.
//!
//! Codes are grouped by the stage that reports them:
//! - `W1xx` - Variant extraction

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Ambiguous anchor orientation.
    ///
    /// Neither endpoint, or both endpoints, of a pin marker line lie at the
    /// reference point. The line's nominal end point is used as the anchor.
    W100,

    /// Anchor not found.
    ///
    /// No marker line was decoded for an expected anchor. The anchor is
    /// placed at the reference point.
    W101,

    /// Malformed candidate path.
    ///
    /// A stroked, unfilled path could not be read as a marker line because
    /// its path data or stroke color is malformed. The path is kept as
    /// symbol content.
    W102,
}

impl DiagnosticCode {
    /// Returns the code as a string, e.g. `"W100"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W100 => "W100",
            Self::W101 => "W101",
            Self::W102 => "W102",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
