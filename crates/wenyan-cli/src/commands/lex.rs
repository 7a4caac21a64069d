//! Lex command - tokenize a file.

use super::read_source;
use std::path::Path;
use wenyan_lexer::Lexer;

pub(crate) fn run(file: &Path) -> miette::Result<()> {
    let source = read_source(file)?;

    println!("Tokenizing: {}\n", file.display());

    let lexer = Lexer::new(&source);
    let mut token_count = 0;
    let mut error_count = 0;

    for result in lexer {
        match result {
            Ok(token) => {
                let text = &source[token.span.clone()];
                let text_display: String = text.chars().take(20).collect();
                let ellipsis = if text.chars().count() > 20 { "..." } else { "" };

                println!(
                    "{:4}..{:4}  {:>3}:{:<3}  {:18}  {}{}",
                    token.span.start,
                    token.span.end,
                    token.loc.start.line,
                    token.loc.start.column,
                    token.kind.class().to_string(),
                    text_display.replace('\n', "\\n"),
                    ellipsis
                );
                token_count += 1;
            }
            Err(err) => {
                let span = err.span();
                let loc = err.location();
                println!(
                    "{:4}..{:4}  {:>3}:{:<3}  {:18}  {}",
                    span.start,
                    span.end,
                    loc.start.line,
                    loc.start.column,
                    "error",
                    err
                );
                error_count += 1;
            }
        }
    }

    println!("\n{} tokens, {} errors", token_count, error_count);

    if error_count > 0 {
        Err(miette::miette!("{} lexer errors", error_count))
    } else {
        Ok(())
    }
}
