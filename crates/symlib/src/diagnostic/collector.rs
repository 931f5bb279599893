//! Collector for accumulating diagnostics while extracting one artifact.

use log::{trace, warn};

use crate::diagnostic::Diagnostic;

/// A collector for accumulating the non-fatal diagnostics of one extraction.
///
/// # Example
///
/// ```
/// # use symlib::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticCollector};
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::warning("anchor `gate` not found")
///         .with_code(DiagnosticCode::W101)
///         .with_help("assuming the reference point"),
/// );
///
/// assert!(!collector.has_errors());
/// assert_eq!(collector.finish().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
            warn!(diagnostic:%; "Extraction error");
        } else {
            trace!(diagnostic:%; "Extraction warning");
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if an error-severity diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return the diagnostics in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
