//! Build command - compile a wenyan file.

use super::{print_diagnostic, read_source};
use crate::CompileArgs;
use std::fs;
use std::path::Path;
use wenyan_diagnostics::LineIndex;
use wenyan_driver::Compiler;

pub(crate) fn run(file: &Path, output: Option<&Path>, args: CompileArgs) -> miette::Result<()> {
    let source = read_source(file)?;

    eprintln!("Compiling: {}", file.display());

    let mut compiler =
        Compiler::new(source, args.options()).with_name(file.display().to_string());
    let compiled = compiler.run().map_err(miette::Report::new)?.to_string();

    let lines = LineIndex::new(compiler.source());
    for diagnostic in compiler.diagnostics() {
        print_diagnostic(file, &lines, diagnostic);
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => file.with_extension(args.target().extension()),
    };
    fs::write(&output, compiled)
        .map_err(|e| miette::miette!("Failed to write {}: {}", output.display(), e))?;

    eprintln!("Wrote: {}", output.display());
    Ok(())
}
