//! Compiler driver for the wenyan language.
//!
//! This crate runs the pipeline over one source text:
//! 1. Scanning
//! 2. Parsing (with macro expansion)
//! 3. Code generation for the selected [`Target`]
//!
//! Every stage reports into one [`DiagnosticsTracker`]. The first fatal
//! diagnostic stops the compile and comes back as a [`CompileError`].
//!
//! ```
//! use wenyan_driver::{compile, CompileOptions};
//!
//! let js = compile("吾有一數。曰三。名之曰「甲」。", CompileOptions::default()).unwrap();
//! assert_eq!(js, "let 甲 = 3;\n");
//! ```

mod error;

pub use error::{CompileError, Warning};
pub use wenyan_codegen::{backend, Backend, Target, BACKENDS};
pub use wenyan_diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsTracker};

use tracing::debug;
use wenyan_ast::Program;
use wenyan_lexer::Token;
use wenyan_parser::ParseOptions;

/// Compiler configuration.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Backend to generate for.
    pub target: Target,
    /// Attach source locations to AST nodes.
    pub source_locations: bool,
    /// Tracker that receives every diagnostic.
    pub diagnostics: DiagnosticsTracker,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            target: Target::default(),
            source_locations: true,
            diagnostics: DiagnosticsTracker::new(),
        }
    }
}

/// One compile of one source text.
///
/// Stage outputs stay available after [`Compiler::run`], including after a
/// failed run, up to the stage that failed.
pub struct Compiler {
    source: String,
    name: String,
    target: Target,
    source_locations: bool,
    tracker: DiagnosticsTracker,
    tokens: Option<Vec<Token>>,
    ast: Option<Program>,
    compiled: Option<String>,
}

impl Compiler {
    pub fn new(source: impl Into<String>, options: CompileOptions) -> Self {
        Self {
            source: source.into(),
            name: "<input>".to_string(),
            target: options.target,
            source_locations: options.source_locations,
            tracker: options.diagnostics,
            tokens: None,
            ast: None,
            compiled: None,
        }
    }

    /// Name the source for rendered errors, usually its path.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Run every stage. A second call returns the first result.
    pub fn run(&mut self) -> Result<&str, CompileError> {
        if self.compiled.is_none() {
            if self.tracker.has_fatal() {
                return Err(self.error());
            }
            self.run_stages().map_err(|_| self.error())?;
        }
        Ok(self.compiled.as_deref().unwrap_or_default())
    }

    fn run_stages(&mut self) -> Result<(), wenyan_diagnostics::FatalError> {
        debug!(name = %self.name, bytes = self.source.len(), "scanning");
        let tokens = wenyan_lexer::tokenize(&self.source, &mut self.tracker)?;
        debug!(tokens = tokens.len(), "scanned");
        self.tokens = Some(tokens.clone());

        let options = ParseOptions {
            locations: self.source_locations,
        };
        let program = wenyan_parser::parse_program(tokens, &mut self.tracker, options)?;
        debug!(statements = program.body.len(), "parsed");

        let mut backend = self.target.backend();
        let compiled = backend.transpile(&program, &mut self.tracker);
        self.ast = Some(program);
        let compiled = compiled?;
        debug!(
            target = %self.target,
            bytes = compiled.len(),
            diagnostics = self.tracker.diagnostics().len(),
            "compiled"
        );
        self.compiled = Some(compiled);
        Ok(())
    }

    fn error(&self) -> CompileError {
        CompileError::new(self.tracker.diagnostics().to_vec(), &self.name, &self.source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    pub fn ast(&self) -> Option<&Program> {
        self.ast.as_ref()
    }

    pub fn compiled(&self) -> Option<&str> {
        self.compiled.as_deref()
    }

    /// Every diagnostic so far, in encounter order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.tracker.diagnostics()
    }
}

/// Compile `source` in one call.
pub fn compile(source: &str, options: CompileOptions) -> Result<String, CompileError> {
    let mut compiler = Compiler::new(source, options);
    compiler.run().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_outputs_are_kept() {
        let mut compiler = Compiler::new("吾有一數。曰三。名之曰「甲」。", CompileOptions::default());
        assert!(compiler.tokens().is_none());
        compiler.run().unwrap();
        assert!(compiler.tokens().unwrap().len() > 1);
        assert_eq!(compiler.ast().unwrap().body.len(), 1);
        assert_eq!(compiler.compiled(), Some("let 甲 = 3;\n"));
        assert!(compiler.diagnostics().is_empty());
    }

    #[test]
    fn test_generation_failure_keeps_ast() {
        let mut compiler = Compiler::new("加其以一。", CompileOptions::default());
        let err = compiler.run().unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Generation);
        assert!(compiler.ast().is_some());
        assert!(compiler.compiled().is_none());
    }

    #[test]
    fn test_second_run_reuses_result() {
        let mut compiler = Compiler::new("加一以二。", CompileOptions::default());
        let first = compiler.run().unwrap().to_string();
        assert_eq!(compiler.run().unwrap(), first);
        assert!(compiler.diagnostics().is_empty());
    }

    #[test]
    fn test_injected_tracker_escalates() {
        let options = CompileOptions {
            diagnostics: DiagnosticsTracker::new().deny_recoverable(true),
            ..CompileOptions::default()
        };
        let err = compile("施一。書之。", options).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::RecoverableParse);
        assert_eq!(err.diagnostics.len(), 1);
        assert!(!err.diagnostics[0].recoverable);
    }
}
