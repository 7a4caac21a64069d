//! Renderable compile errors.

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use wenyan_diagnostics::{Diagnostic, DiagnosticKind};

/// The fatal diagnostic that stopped a compile, with the source it points
/// into and every diagnostic recorded before it.
#[derive(Error, Debug, MietteDiagnostic)]
#[error("{kind}: {message}")]
#[diagnostic(code(wenyan::compile))]
pub struct CompileError {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    pub column: usize,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("{kind}")]
    pub span: Option<SourceSpan>,

    /// Recoverable diagnostics reported before the fatal one.
    #[related]
    pub related: Vec<Warning>,

    /// Every diagnostic of the compile, the fatal one last.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileError {
    /// Build from the tracker's diagnostics. The last fatal one is the
    /// headline.
    pub fn new(diagnostics: Vec<Diagnostic>, name: &str, source: &str) -> Self {
        let fatal = diagnostics
            .iter()
            .rev()
            .find(|d| !d.recoverable)
            .cloned()
            .unwrap_or_else(|| {
                Diagnostic::new(DiagnosticKind::Generation, "compile failed", None, false)
            });
        let related = diagnostics
            .iter()
            .filter(|d| d.recoverable)
            .map(Warning::from)
            .collect();
        Self {
            kind: fatal.kind,
            message: fatal.message.clone(),
            line: fatal.line,
            column: fatal.column,
            src: NamedSource::new(name, source.to_string()),
            span: source_span(&fatal),
            related,
            diagnostics,
        }
    }
}

/// A recoverable diagnostic shown alongside a [`CompileError`].
#[derive(Error, Debug, MietteDiagnostic)]
#[error("{kind}: {message}")]
#[diagnostic(severity(Warning))]
pub struct Warning {
    pub kind: DiagnosticKind,
    pub message: String,
    #[label]
    pub span: Option<SourceSpan>,
}

impl From<&Diagnostic> for Warning {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            kind: diagnostic.kind,
            message: diagnostic.message.clone(),
            span: source_span(diagnostic),
        }
    }
}

fn source_span(diagnostic: &Diagnostic) -> Option<SourceSpan> {
    (diagnostic.line > 0).then(|| {
        let span = &diagnostic.span;
        (span.start, span.end.saturating_sub(span.start)).into()
    })
}
