//! Info command - show information about the wenyan compiler.

use wenyan_driver::BACKENDS;

pub(crate) fn run() -> miette::Result<()> {
    println!("wenyan compiler");
    println!("===============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Components:");
    println!("  wenyan-diagnostics - Source positions and the diagnostics tracker");
    println!("  wenyan-lexer       - Tokenization");
    println!("  wenyan-parser      - AST generation and macro expansion");
    println!("  wenyan-ast         - Abstract Syntax Tree definitions");
    println!("  wenyan-codegen     - Target backends");
    println!("  wenyan-driver      - Compilation pipeline");
    println!();

    println!("Targets:");
    for (key, _) in BACKENDS {
        println!("  {}", key);
    }

    Ok(())
}
