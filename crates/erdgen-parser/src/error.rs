//! Error and diagnostic system for the erdgen model extractor.
//!
//! Almost everything that goes wrong while reading a diagram is recoverable:
//! a dangling arrow or an unnamed shape is excluded from the model and
//! reported as a [`Severity::Warning`]. Only a document that cannot be read
//! as a graph at all produces a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use erdgen_parser::error::{Diagnostic, ErrorCode};
//! # use erdgen_parser::Span;
//!
//! let span = Span::new(100..120);
//!
//! let diag = Diagnostic::warning("edge `e7` points at unknown cell `9`")
//!     .with_code(ErrorCode::E102)
//!     .with_label(span, "dangling edge")
//!     .with_help("connect both ends of the arrow to an entity");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelRole};
pub use parse_error::ParseError;
pub use severity::Severity;
