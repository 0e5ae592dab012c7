//! Records produced by the parser.
//!
//! A parsed input sequence is an ordered list of [`ValueInterval`]s, each
//! pairing a value with the half-open range of contract years it covers.

use serde::Serialize;
use std::fmt;

// ──────────────────────────────────────────────
// Duration modes
// ──────────────────────────────────────────────

/// How a duration boundary was addressed in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    /// Reserved; also the mode in effect before any boundary is resolved.
    Inception,
    /// Reserved; never produced by the grammar.
    Inforce,
    /// `retirement`: retirement age less issue age.
    Retirement,
    /// `@n`: attained age `n`, converted by subtracting issue age.
    AttainedAge,
    /// Bare integer: an absolute duration.
    Duration,
    /// `#n`: `n` years past the previous boundary.
    NumberOfYears,
    /// `maturity`: years to maturity.
    Maturity,
    /// Error sentinel for a boundary that could not be resolved.
    Invalid,
}

impl DurationMode {
    pub fn is_invalid(self) -> bool {
        self == DurationMode::Invalid
    }
}

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// The value a span assigns to its range of years.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IntervalValue {
    Number(f64),
    /// One of the caller's allowed keywords.
    Keyword(String),
}

impl Default for IntervalValue {
    fn default() -> Self {
        IntervalValue::Number(0.0)
    }
}

impl fmt::Display for IntervalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalValue::Number(n) => write!(f, "{}", n),
            IntervalValue::Keyword(k) => f.write_str(k),
        }
    }
}

// ──────────────────────────────────────────────
// Intervals
// ──────────────────────────────────────────────

/// A value holding over the half-open duration range `[begin, end)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueInterval {
    pub value: IntervalValue,
    pub begin: i32,
    pub end: i32,
    pub begin_mode: DurationMode,
    pub end_mode: DurationMode,
    /// True while the record is being assembled; never true once retained.
    #[serde(skip)]
    pub insane: bool,
}

impl Default for ValueInterval {
    fn default() -> Self {
        ValueInterval {
            value: IntervalValue::default(),
            begin: 0,
            end: 0,
            begin_mode: DurationMode::Invalid,
            end_mode: DurationMode::Invalid,
            insane: true,
        }
    }
}

/// Canonical text form, e.g. `7 [3, 5)`.
impl fmt::Display for ValueInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.value, self.begin, self.end)
    }
}
