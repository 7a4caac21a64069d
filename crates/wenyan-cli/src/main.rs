//! wenyan CLI - command-line interface for the wenyan compiler.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wenyan_driver::{CompileOptions, DiagnosticsTracker, Target};

mod commands;

/// wenyan - compile classical Chinese programs to JavaScript
#[derive(Parser)]
#[command(name = "wenyan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a wenyan file
    Build {
        /// Input file
        file: PathBuf,
        /// Output file (default: input file with the target's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Check wenyan files for errors without writing output
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Tokenize a wenyan file and show tokens
    Lex {
        /// Input file
        file: PathBuf,
    },

    /// Parse a wenyan file and show the AST
    Parse {
        /// Input file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information about the wenyan compiler
    Info,
}

/// Options shared by commands that run the whole pipeline.
#[derive(Args, Clone, Copy)]
pub(crate) struct CompileArgs {
    /// Target backend
    #[arg(long, default_value = "js")]
    target: Target,
    /// Do not attach source locations to the AST
    #[arg(long)]
    no_locations: bool,
    /// Treat recoverable diagnostics as errors
    #[arg(long)]
    deny_warnings: bool,
}

impl CompileArgs {
    pub(crate) fn options(self) -> CompileOptions {
        CompileOptions {
            target: self.target,
            source_locations: !self.no_locations,
            diagnostics: DiagnosticsTracker::new().deny_recoverable(self.deny_warnings),
        }
    }

    pub(crate) fn target(self) -> Target {
        self.target
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Build {
            file,
            output,
            compile,
        } => commands::build::run(&file, output.as_deref(), compile),
        Commands::Check { files, compile } => commands::check::run(&files, compile),
        Commands::Lex { file } => commands::lex::run(&file),
        Commands::Parse { file, json } => commands::parse::run(&file, json),
        Commands::Info => commands::info::run(),
    }
}
