//! inseq-core: parser for the input-sequence language.
//!
//! An input sequence describes how a contract quantity changes over the
//! years, e.g. `"1 3; 7 5; 0"`: the value 1 for durations 0 through 2, 7 for
//! durations 3 and 4, and 0 from then until maturity. Parsing yields an
//! ordered list of [`ValueInterval`]s plus any [`Diagnostic`]s.
//!
//! # Public API
//!
//! - [`InputSequence::parse()`] -- parse one expression
//! - [`SequenceParams`] -- contract facts and allowed value keywords
//! - [`abridge_diagnostic()`] -- reduce diagnostic text to one sentence
//! - [`validate_duration()`] / [`resolve_scalar()`] -- the pure duration steps
//!
//! The crate performs no I/O and keeps no global state; separate parses are
//! independent.

pub mod ast;
pub mod duration;
pub mod error;
pub mod lexer;
mod parser;
pub mod sequence;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::{DurationMode, IntervalValue, ValueInterval};
pub use duration::{resolve_scalar, validate_duration, Bounds, CommittedRange, RawScalar};
pub use error::{abridge_diagnostic, AbridgeError, Diagnostic, DiagnosticKind, RangeError};
pub use sequence::{InputSequence, SequenceError, SequenceParams};
