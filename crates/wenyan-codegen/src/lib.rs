//! Target backends for the wenyan compiler.
//!
//! A [`Backend`] turns a parsed [`Program`] into target source text. Backends
//! are looked up by key in the static [`BACKENDS`] registry; the only one
//! shipped is JavaScript (`"js"`).
//!
//! ```
//! use wenyan_codegen::{Backend, Target};
//! use wenyan_diagnostics::DiagnosticsTracker;
//!
//! let program = wenyan_parser::parse("吾有一數。曰三。名之曰「甲」。").ast.unwrap();
//! let mut tracker = DiagnosticsTracker::new();
//! let js = Target::JavaScript.backend().transpile(&program, &mut tracker).unwrap();
//! assert_eq!(js, "let 甲 = 3;\n");
//! ```

mod error;
mod javascript;
mod names;
mod scope;

pub use error::CodegenError;
pub use javascript::JavaScriptBackend;
pub use names::mangle;

use std::fmt;
use std::str::FromStr;
use wenyan_ast::Program;
use wenyan_diagnostics::{DiagnosticsTracker, FatalError};

/// Translates a program into target source text.
pub trait Backend {
    /// Registry key of this backend.
    fn name(&self) -> &'static str;

    /// Generate target text. Generation failures are recorded in `tracker`
    /// as `GenerationError` diagnostics and abort with no output.
    fn transpile(
        &mut self,
        program: &Program,
        tracker: &mut DiagnosticsTracker,
    ) -> Result<String, FatalError>;
}

pub type BackendConstructor = fn() -> Box<dyn Backend>;

/// Every available backend, by key.
pub const BACKENDS: &[(&str, BackendConstructor)] = &[("js", javascript_backend)];

fn javascript_backend() -> Box<dyn Backend> {
    Box::new(JavaScriptBackend::new())
}

/// Construct the backend registered under `key`.
pub fn backend(key: &str) -> Option<Box<dyn Backend>> {
    BACKENDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, construct)| construct())
}

/// A compilation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    #[default]
    JavaScript,
}

impl Target {
    /// Registry key of this target.
    pub fn key(self) -> &'static str {
        match self {
            Target::JavaScript => "js",
        }
    }

    /// Output file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Target::JavaScript => "js",
        }
    }

    pub fn backend(self) -> Box<dyn Backend> {
        match self {
            Target::JavaScript => javascript_backend(),
        }
    }
}

impl FromStr for Target {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "js" | "javascript" => Ok(Target::JavaScript),
            other => Err(CodegenError::UnknownTarget(other.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(backend("js").map(|b| b.name()), Some("js"));
        assert!(backend("py").is_none());
        for (key, construct) in BACKENDS {
            assert_eq!(construct().name(), *key);
        }
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("js".parse::<Target>(), Ok(Target::JavaScript));
        assert_eq!(
            "py".parse::<Target>(),
            Err(CodegenError::UnknownTarget("py".to_string()))
        );
        assert_eq!(Target::default().to_string(), "js");
    }

    #[test]
    fn test_every_target_is_registered() {
        let target = Target::JavaScript;
        assert!(backend(target.key()).is_some());
        assert_eq!(target.backend().name(), target.key());
    }
}
