//! Duration resolution and range validation.
//!
//! Both steps are pure: resolution maps a raw scalar onto an absolute
//! duration given the session's context, and validation judges a candidate
//! range without touching any state. Advancing the running boundary after a
//! successful validation is left to the caller.

use crate::ast::{DurationMode, ValueInterval};
use crate::error::RangeError;

/// A duration scalar as written, before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawScalar {
    /// `n`
    Duration(i32),
    /// `@n`
    AttainedAge(i32),
    /// `#n`
    NumberOfYears(i32),
    /// `retirement`
    Retirement,
    /// `maturity`
    Maturity,
}

/// State a scalar is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveContext {
    pub issue_age: i32,
    pub retirement_age: i32,
    pub years_to_maturity: i32,
    pub last_resolved_duration: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedScalar {
    pub duration: i32,
    pub mode: DurationMode,
}

impl ResolvedScalar {
    pub const INVALID: ResolvedScalar = ResolvedScalar {
        duration: 0,
        mode: DurationMode::Invalid,
    };
}

pub fn resolve_scalar(raw: RawScalar, cx: &ResolveContext) -> ResolvedScalar {
    let (duration, mode) = match raw {
        RawScalar::Duration(n) => (n, DurationMode::Duration),
        RawScalar::AttainedAge(age) => (
            age.saturating_sub(cx.issue_age),
            DurationMode::AttainedAge,
        ),
        RawScalar::NumberOfYears(n) => (
            n.saturating_add(cx.last_resolved_duration),
            DurationMode::NumberOfYears,
        ),
        RawScalar::Retirement => (
            cx.retirement_age.saturating_sub(cx.issue_age),
            DurationMode::Retirement,
        ),
        RawScalar::Maturity => (cx.years_to_maturity, DurationMode::Maturity),
    };
    ResolvedScalar { duration, mode }
}

/// A candidate half-open range, with the mode that produced each end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub begin: i32,
    pub begin_mode: DurationMode,
    pub end: i32,
    pub end_mode: DurationMode,
}

/// A range that passed [`validate_duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedRange(Bounds);

impl CommittedRange {
    pub fn end(&self) -> i32 {
        self.0.end
    }

    pub fn end_mode(&self) -> DurationMode {
        self.0.end_mode
    }

    /// Write the range into `interval`, which is thereby no longer insane.
    pub fn apply_to(&self, interval: &mut ValueInterval) {
        let b = self.0;
        interval.begin = b.begin;
        interval.end = b.end;
        interval.begin_mode = b.begin_mode;
        interval.end_mode = b.end_mode;
        interval.insane = false;
    }
}

/// Accept `bounds` only if both modes are valid and
/// `0 <= begin < end <= years_to_maturity`.
pub fn validate_duration(
    bounds: Bounds,
    years_to_maturity: i32,
) -> Result<CommittedRange, RangeError> {
    let Bounds { begin, end, .. } = bounds;
    if bounds.begin_mode.is_invalid() || bounds.end_mode.is_invalid() {
        return Err(RangeError::InvalidMode { begin, end });
    }
    if begin < 0 {
        return Err(RangeError::BeginsBeforeInception { begin, end });
    }
    if end <= begin {
        return Err(RangeError::Improper { begin, end });
    }
    if years_to_maturity < end {
        return Err(RangeError::EndsAfterMaturity { begin, end });
    }
    Ok(CommittedRange(bounds))
}
