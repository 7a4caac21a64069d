//! CLI commands.

pub mod build;
pub mod check;
pub mod info;
pub mod lex;
pub mod parse;

use std::fs;
use std::path::Path;
use wenyan_diagnostics::{Diagnostic, LineIndex};

pub(crate) fn read_source(file: &Path) -> miette::Result<String> {
    fs::read_to_string(file).map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))
}

/// Print a diagnostic with its position and the source line it points at.
pub(crate) fn print_diagnostic(file: &Path, lines: &LineIndex, diagnostic: &Diagnostic) {
    let severity = if diagnostic.recoverable { "warning" } else { "error" };
    eprintln!("  {}[{}]: {}", severity, diagnostic.kind, diagnostic.message);
    if diagnostic.line == 0 {
        return;
    }
    eprintln!("   --> {}:{}:{}", file.display(), diagnostic.line, diagnostic.column);
    if let Some(text) = lines.line_text(diagnostic.line) {
        eprintln!("    |");
        eprintln!("{:4} | {}", diagnostic.line, text);
        eprintln!("    |");
    }
}
