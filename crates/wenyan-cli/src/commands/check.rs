//! Check command - compile files without writing output.

use super::{print_diagnostic, read_source};
use crate::CompileArgs;
use std::path::{Path, PathBuf};
use wenyan_diagnostics::LineIndex;
use wenyan_driver::Compiler;

pub(crate) fn run(files: &[PathBuf], args: CompileArgs) -> miette::Result<()> {
    if files.is_empty() {
        return Err(miette::miette!("No files specified"));
    }

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for file in files {
        let (errors, warnings) = check_file(file, args)?;
        total_errors += errors;
        total_warnings += warnings;
    }

    println!();
    if total_errors > 0 {
        println!(
            "Check complete: {} error(s), {} warning(s)",
            total_errors, total_warnings
        );
        Err(miette::miette!("{} errors found", total_errors))
    } else if total_warnings > 0 {
        println!("Check complete: {} warning(s)", total_warnings);
        Ok(())
    } else {
        println!("Check complete: no issues found");
        Ok(())
    }
}

fn check_file(file: &Path, args: CompileArgs) -> miette::Result<(usize, usize)> {
    let source = read_source(file)?;

    println!("Checking: {}", file.display());

    let mut compiler = Compiler::new(source, args.options());
    let ok = compiler.run().is_ok();

    let lines = LineIndex::new(compiler.source());
    let diagnostics = compiler.diagnostics();
    for diagnostic in diagnostics {
        print_diagnostic(file, &lines, diagnostic);
    }

    let errors = diagnostics.iter().filter(|d| !d.recoverable).count();
    let warnings = diagnostics.len() - errors;
    if ok && warnings == 0 {
        println!("  ok");
    }

    Ok((errors, warnings))
}
