//! Diagnostics recorded while parsing an input sequence.
//!
//! Every malformed construct produces one [`Diagnostic`]: a tagged
//! [`DiagnosticKind`] plus the tokenizer context (current token and byte
//! offset) at the moment it was noticed. [`render_diagnostics`] turns the
//! list into the developer-facing text form, and [`abridge_diagnostic`]
//! reduces that text to a single sentence for end users.

use std::fmt;

/// Text that introduces the tokenizer-context suffix of a rendered diagnostic.
pub const CONTEXT_MARKER: &str = " Current token";

/// What went wrong, independent of where.
///
/// The `Display` form of each variant is the human-readable phrase that
/// opens the rendered diagnostic line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiagnosticKind {
    // -- lexical --
    #[error("Invalid number '{text}'.")]
    InvalidNumber { text: String },

    #[error("Unknown token '{found}'.")]
    UnknownToken { found: char },

    // -- syntactic --
    #[error("Expected '{expected}'.")]
    ExpectedToken { expected: String },

    #[error("Expected ';'.")]
    ExpectedSeparator,

    #[error("Expected number or keyword.")]
    ExpectedValue,

    #[error("Expected ')' or ']'.")]
    ExpectedCloseBracket,

    #[error("Expected number, '@', '#', '[', '(', 'retirement' or 'maturity'.")]
    ExpectedDuration,

    #[error("Expected number, '@', '#', 'retirement' or 'maturity'.")]
    ExpectedDurationScalar,

    #[error("Expected keyword 'retirement' or 'maturity'.")]
    ExpectedDurationKeyword,

    #[error("Expected an integral duration, but found {found}.")]
    NonIntegralDuration { found: f64 },

    // -- keyword-domain --
    #[error("Expected number.")]
    ExpectedNumber,

    #[error("Expected keyword chosen from {{ {} }}.", .allowed.join(" "))]
    ExpectedAllowedKeyword { allowed: Vec<String> },

    // -- range --
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Why a candidate duration range was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Interval [ {begin}, {end} ) has an invalid duration mode.")]
    InvalidMode { begin: i32, end: i32 },

    #[error("Interval [ {begin}, {end} ) must not begin before duration 0.")]
    BeginsBeforeInception { begin: i32, end: i32 },

    #[error("Interval [ {begin}, {end} ) is improper: it ends before it begins.")]
    Improper { begin: i32, end: i32 },

    #[error("Interval [ {begin}, {end} ) not valid: it ends after the last possible duration.")]
    EndsAfterMaturity { begin: i32, end: i32 },
}

/// One recorded problem, with the tokenizer context it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Display name of the token current when the problem was noticed.
    pub token: String,
    /// Byte offset of the scanner at that moment.
    pub position: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, token: impl Into<String>, position: usize) -> Self {
        Diagnostic {
            kind,
            token: token.into(),
            position,
        }
    }

    /// Serialize to JSON. The rendered line is included so consumers that
    /// only want text need not re-render it.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "message":  self.kind.to_string(),
            "position": self.position,
            "text":     self.to_string(),
            "token":    self.token,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} '{}' at position {}.",
            self.kind, CONTEXT_MARKER, self.token, self.position
        )
    }
}

/// Render diagnostics as newline-terminated lines, in the order recorded.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        out.push_str(&d.to_string());
        out.push('\n');
    }
    out
}

/// Failure of [`abridge_diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbridgeError {
    #[error("cannot abridge an empty diagnostic")]
    EmptyInput,

    #[error("abridging diagnostic {original:?} left nothing")]
    EmptyResult { original: String },
}

/// Reduce diagnostic text to the end-user form: the first line only, with
/// the tokenizer-context suffix removed and trailing blanks trimmed.
pub fn abridge_diagnostic(text: &str) -> Result<String, AbridgeError> {
    if text.is_empty() {
        return Err(AbridgeError::EmptyInput);
    }
    let first_line = text.lines().next().unwrap_or_default();
    let sentence = match first_line.find(CONTEXT_MARKER) {
        Some(at) => &first_line[..at],
        None => first_line,
    };
    let abridged = sentence.trim_end();
    if abridged.is_empty() {
        return Err(AbridgeError::EmptyResult {
            original: text.to_owned(),
        });
    }
    Ok(abridged.to_owned())
}
