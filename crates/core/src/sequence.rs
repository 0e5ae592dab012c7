//! Public entry point: parse one input-sequence expression.

use crate::ast::ValueInterval;
use crate::error::{abridge_diagnostic, render_diagnostics, Diagnostic};
use crate::parser::Parser;
use serde::{Deserialize, Serialize};

/// Contract facts and value rules a sequence is parsed against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceParams {
    pub years_to_maturity: i32,
    pub issue_age: i32,
    pub retirement_age: i32,
    /// Accepted but not used in duration resolution.
    pub inforce_duration: i32,
    /// Accepted but not used in duration resolution.
    pub effective_year: i32,
    /// Keywords that may appear as a value.
    pub allowed_keywords: Vec<String>,
    /// Reject numeric values.
    pub keywords_only: bool,
}

impl SequenceParams {
    pub fn new(years_to_maturity: i32, issue_age: i32, retirement_age: i32) -> Self {
        SequenceParams {
            years_to_maturity,
            issue_age,
            retirement_age,
            ..SequenceParams::default()
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn keywords_only(mut self, keywords_only: bool) -> Self {
        self.keywords_only = keywords_only;
        self
    }

    pub fn allows_keyword(&self, keyword: &str) -> bool {
        self.allowed_keywords.iter().any(|k| k == keyword)
    }
}

/// A parsed input sequence: the intervals in source order, plus every
/// diagnostic recorded along the way.
///
/// Any diagnostic makes the whole interval list untrustworthy, not just the
/// span it names; see [`InputSequence::into_intervals`].
#[derive(Debug, Clone, PartialEq)]
pub struct InputSequence {
    intervals: Vec<ValueInterval>,
    diagnostics: Vec<Diagnostic>,
}

impl InputSequence {
    pub fn parse(text: &str, params: &SequenceParams) -> Self {
        let out = Parser::new(text, params).run();
        InputSequence {
            intervals: out.intervals,
            diagnostics: out.diagnostics,
        }
    }

    pub fn intervals(&self) -> &[ValueInterval] {
        &self.intervals
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Full developer-facing diagnostic text, one line per diagnostic.
    pub fn diagnostics_text(&self) -> String {
        render_diagnostics(&self.diagnostics)
    }

    /// The intervals written back in canonical form, e.g.
    /// `1 [0, 3); 7 [3, 5)`.
    pub fn canonical_form(&self) -> String {
        self.intervals
            .iter()
            .map(ValueInterval::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The intervals, if the expression was entirely well formed. Otherwise
    /// every value is discarded and only the diagnostics survive.
    pub fn into_intervals(self) -> Result<Vec<ValueInterval>, SequenceError> {
        if self.diagnostics.is_empty() {
            return Ok(self.intervals);
        }
        let details = render_diagnostics(&self.diagnostics);
        let message = abridge_diagnostic(&details).unwrap_or_else(|_| details.clone());
        Err(SequenceError {
            message,
            details,
            diagnostics: self.diagnostics,
        })
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        let diagnostics: Vec<_> = self
            .diagnostics
            .iter()
            .map(Diagnostic::to_json_value)
            .collect();
        serde_json::json!({
            "canonical":   self.canonical_form(),
            "diagnostics": diagnostics,
            "intervals":   self.intervals,
        })
    }
}

/// A rejected input sequence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SequenceError {
    /// One end-user sentence.
    pub message: String,
    /// Every diagnostic, rendered.
    pub details: String,
    pub diagnostics: Vec<Diagnostic>,
}
