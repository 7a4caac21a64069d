//! JavaScript binding names.

use std::fmt::Write;

const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield", "module", "require", "console", "__public__",
];

/// Whether `name` can be emitted as-is. A leading `_` is left to mangled
/// names only.
fn is_plain(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_alphabetic()
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !RESERVED.contains(&name)
}

/// The JavaScript name for a wenyan name.
///
/// Anything that is not a plain identifier becomes `_` followed by the hex
/// code points, e.g. `「1」` becomes `_31`. Plain names never start with `_`,
/// so a mangled name cannot meet a kept one. Generated temporaries carry a
/// `$`, which user names never keep.
pub fn mangle(name: &str) -> String {
    if is_plain(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() * 3);
    for c in name.chars() {
        let _ = write!(out, "_{:x}", c as u32);
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_kept() {
        assert_eq!(mangle("甲"), "甲");
        assert_eq!(mangle("加法"), "加法");
        assert_eq!(mangle("x1"), "x1");
    }

    #[test]
    fn test_invalid_names_are_mangled() {
        assert_eq!(mangle("1"), "_31");
        assert_eq!(mangle("a$"), "_61_24");
        assert_eq!(mangle("a b"), "_61_20_62");
        assert_eq!(mangle(""), "_");
    }

    #[test]
    fn test_underscore_names_never_meet_mangled_ones() {
        assert_eq!(mangle("_31"), "_5f_33_31");
        assert_ne!(mangle("_31"), mangle("1"));
        assert_eq!(mangle("_"), "_5f");
        assert_ne!(mangle("_"), mangle(""));
    }

    #[test]
    fn test_reserved_words_are_mangled() {
        assert_eq!(mangle("if"), "_69_66");
        assert_eq!(mangle("__public__"), "_5f_5f_70_75_62_6c_69_63_5f_5f");
    }
}
