//! Macro expansion over the unparsed token stream.

use smol_str::SmolStr;
use wenyan_lexer::{Token, TokenKind};

type Bindings = Vec<(SmolStr, TokenKind)>;

/// Rewrite `tokens[start..]`, replacing every occurrence of `pattern` with
/// `replacement`. Returns the number of replacements.
///
/// Quoted names in the pattern each capture one token; the same name in the
/// replacement is substituted with the capture. Replacement tokens take the
/// span of the matched text and are not rescanned.
pub(crate) fn expand(
    tokens: &mut Vec<Token>,
    start: usize,
    pattern: &[Token],
    replacement: &[Token],
) -> usize {
    if pattern.is_empty() {
        return 0;
    }

    let tail = tokens.split_off(start);
    let mut count = 0;
    let mut i = 0;
    while i < tail.len() {
        let Some(bindings) = bind(&tail[i..], pattern) else {
            tokens.push(tail[i].clone());
            i += 1;
            continue;
        };

        let first = &tail[i];
        let last = &tail[i + pattern.len() - 1];
        let span = first.span.start..last.span.end;
        let loc = first.loc.merge(last.loc);
        for token in replacement {
            let kind = match &token.kind {
                TokenKind::Identifier(name) => lookup(&bindings, name)
                    .cloned()
                    .unwrap_or_else(|| token.kind.clone()),
                kind => kind.clone(),
            };
            tokens.push(Token::new(kind, span.clone(), loc));
        }
        i += pattern.len();
        count += 1;
    }
    count
}

fn lookup<'a>(bindings: &'a Bindings, name: &SmolStr) -> Option<&'a TokenKind> {
    bindings
        .iter()
        .find(|(bound, _)| bound == name)
        .map(|(_, kind)| kind)
}

fn bind(window: &[Token], pattern: &[Token]) -> Option<Bindings> {
    if window.len() < pattern.len() {
        return None;
    }
    let mut bindings = Bindings::new();
    for (token, expected) in window.iter().zip(pattern) {
        if token.kind.is_end_marker() && token.kind != expected.kind {
            return None;
        }
        match &expected.kind {
            TokenKind::Identifier(name) => match lookup(&bindings, name) {
                Some(bound) if *bound != token.kind => return None,
                Some(_) => {}
                None => bindings.push((name.clone(), token.kind.clone())),
            },
            kind if *kind != token.kind => return None,
            _ => {}
        }
    }
    Some(bindings)
}
