//! The diagnostics tracker.

use crate::{Diagnostic, DiagnosticKind, SourceLocation};
use thiserror::Error;

/// A fatal diagnostic. The compile stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FatalError(pub Diagnostic);

impl FatalError {
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.0
    }
}

/// Collects diagnostics in the order they are encountered.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsTracker {
    diagnostics: Vec<Diagnostic>,
    deny_recoverable: bool,
}

impl DiagnosticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escalate every recoverable diagnostic to a fatal one.
    pub fn deny_recoverable(mut self, deny: bool) -> Self {
        self.deny_recoverable = deny;
        self
    }

    /// Record a diagnostic.
    ///
    /// Returns `Err` when the diagnostic is fatal; the diagnostic is recorded
    /// either way.
    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        location: Option<&SourceLocation>,
        recoverable: bool,
    ) -> Result<(), FatalError> {
        self.emit(Diagnostic::new(kind, message, location, recoverable))
    }

    /// Record a fatal diagnostic and hand back the error to propagate.
    pub fn fatal(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        location: Option<&SourceLocation>,
    ) -> FatalError {
        let diagnostic = Diagnostic::new(kind, message, location, false);
        self.diagnostics.push(diagnostic.clone());
        FatalError(diagnostic)
    }

    /// Record an already-built diagnostic.
    pub fn emit(&mut self, mut diagnostic: Diagnostic) -> Result<(), FatalError> {
        if diagnostic.recoverable && !self.deny_recoverable {
            self.diagnostics.push(diagnostic);
            return Ok(());
        }
        diagnostic.recoverable = false;
        self.diagnostics.push(diagnostic.clone());
        Err(FatalError(diagnostic))
    }

    /// All diagnostics so far, in encounter order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether a fatal diagnostic has been recorded.
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(|d| !d.recoverable)
    }

    pub fn recoverable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.recoverable).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_is_queued() {
        let mut tracker = DiagnosticsTracker::new();
        assert!(tracker
            .report(DiagnosticKind::Scan, "bad numeral", None, true)
            .is_ok());
        assert!(!tracker.has_fatal());
        assert_eq!(tracker.recoverable_count(), 1);
    }

    #[test]
    fn test_fatal_returns_error_and_keeps_order() {
        let mut tracker = DiagnosticsTracker::new();
        tracker
            .report(DiagnosticKind::RecoverableParse, "first", None, true)
            .unwrap();
        let err = tracker
            .report(DiagnosticKind::StructuralParse, "second", None, false)
            .unwrap_err();
        assert_eq!(err.diagnostic().message, "second");
        let messages: Vec<_> = tracker
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(tracker.has_fatal());
    }

    #[test]
    fn test_fatal_is_recorded() {
        let mut tracker = DiagnosticsTracker::new();
        let err = tracker.fatal(DiagnosticKind::Generation, "no answer", None);
        assert_eq!(tracker.diagnostics(), &[err.0]);
    }

    #[test]
    fn test_deny_recoverable_escalates() {
        let mut tracker = DiagnosticsTracker::new().deny_recoverable(true);
        let err = tracker
            .report(DiagnosticKind::Scan, "bad numeral", None, true)
            .unwrap_err();
        assert!(!err.diagnostic().recoverable);
        assert_eq!(tracker.recoverable_count(), 0);
    }
}
