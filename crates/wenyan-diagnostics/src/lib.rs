//! # Wenyan Diagnostics
//!
//! Source position tracking and the diagnostics tracker shared by every
//! stage of the wenyan compiler.
//!
//! Every stage reports through a [`DiagnosticsTracker`]. Recoverable
//! diagnostics are queued and the stage keeps going; fatal diagnostics come
//! back as a [`FatalError`] that the stage propagates with `?`.
//!
//! ## Example
//!
//! ```
//! use wenyan_diagnostics::{DiagnosticKind, DiagnosticsTracker};
//!
//! let mut tracker = DiagnosticsTracker::new();
//! tracker
//!     .report(DiagnosticKind::RecoverableParse, "stray token", None, true)
//!     .unwrap();
//! assert_eq!(tracker.diagnostics().len(), 1);
//!
//! let fatal = tracker.report(DiagnosticKind::Generation, "no answer", None, false);
//! assert!(fatal.is_err());
//! assert_eq!(tracker.diagnostics().len(), 2);
//! ```

mod diagnostic;
mod location;
mod tracker;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use location::{LineIndex, Position, SourceLocation};
pub use tracker::{DiagnosticsTracker, FatalError};
