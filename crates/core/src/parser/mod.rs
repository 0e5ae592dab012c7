/// Recursive-descent grammar driver for the input-sequence language.
///
/// ```text
/// sequence        := span (';' span)* ';'?
/// span            := value ','? duration
/// value           := number | keyword
/// duration        := <empty> | duration-scalar
///                  | ('[' | '(') duration-scalar ',' duration-scalar (']' | ')')
/// duration-scalar := integer | '@' integer | '#' integer | 'retirement' | 'maturity'
/// ```
///
/// Problems are recorded as diagnostics and parsing carries on; only a
/// token that cannot begin a span at sequence level stops the parse.
use crate::ast::{DurationMode, IntervalValue, ValueInterval};
use crate::duration::{validate_duration, CommittedRange};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::lexer::{Scanner, Token, TokenKind};
use crate::sequence::SequenceParams;
use tracing::{debug, trace};

mod duration;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    params: &'a SequenceParams,
    current: Token,
    /// Where the next span's implicit begin-point lies.
    last_resolved_duration: i32,
    /// Mode of the last committed boundary.
    previous_mode: DurationMode,
    intervals: Vec<ValueInterval>,
    diagnostics: Vec<Diagnostic>,
}

/// Everything a finished parse leaves behind.
pub(crate) struct ParseOutput {
    pub intervals: Vec<ValueInterval>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str, params: &'a SequenceParams) -> Self {
        Parser {
            scanner: Scanner::new(src),
            params,
            current: Token::Start,
            last_resolved_duration: 0,
            previous_mode: DurationMode::Inception,
            intervals: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> ParseOutput {
        self.parse_sequence();
        ParseOutput {
            intervals: self.intervals,
            diagnostics: self.diagnostics,
        }
    }

    fn get_token(&mut self) {
        match self.scanner.next_token() {
            Ok(token) => self.current = token,
            Err(e) => {
                self.current = e.recovered;
                self.diagnose(e.kind);
            }
        }
        trace!(token = ?self.current, position = self.scanner.position(), "scanned");
    }

    fn diagnose(&mut self, kind: DiagnosticKind) {
        let d = Diagnostic::new(
            kind,
            self.current.kind().to_string(),
            self.scanner.position(),
        );
        debug!(diagnostic = %d, "input sequence diagnostic");
        self.diagnostics.push(d);
    }

    /// Advance past the current token if it is of kind `expected`;
    /// otherwise record a diagnostic and leave it unconsumed.
    fn expect(&mut self, expected: TokenKind) -> bool {
        if self.current.kind() == expected {
            self.get_token();
            true
        } else {
            self.diagnose(DiagnosticKind::ExpectedToken {
                expected: expected.to_string(),
            });
            false
        }
    }

    fn commit(&mut self, mut interval: ValueInterval, range: CommittedRange) {
        range.apply_to(&mut interval);
        self.last_resolved_duration = range.end();
        self.previous_mode = range.end_mode();
        debug!(
            begin = interval.begin,
            end = interval.end,
            value = %interval.value,
            "committed interval"
        );
        self.intervals.push(interval);
    }

    // -- Productions ---------------------------------------------

    fn parse_sequence(&mut self) {
        let mut at_start = true;
        loop {
            match self.current {
                Token::Eof => return,
                Token::Start if at_start => {}
                Token::Punct(';') => {}
                _ => {
                    self.diagnose(DiagnosticKind::ExpectedSeparator);
                    return;
                }
            }
            at_start = false;
            self.get_token();
            if self.current == Token::Eof {
                return;
            }
            self.parse_span();
        }
    }

    fn parse_span(&mut self) {
        let mut candidate = ValueInterval::default();
        let has_value = self.parse_value(&mut candidate);

        if self.current.is_punct(',') {
            self.get_token();
        }

        let Some(bounds) = self.parse_duration() else {
            return;
        };
        match validate_duration(bounds, self.params.years_to_maturity) {
            Ok(range) if has_value => self.commit(candidate, range),
            Ok(_) => {}
            Err(e) => self.diagnose(e.into()),
        }
    }

    /// Returns false only when no value token was present at all. A value
    /// of the wrong shape, or a keyword outside the allow-list, is reported
    /// and consumed, and the span keeps its default value.
    fn parse_value(&mut self, candidate: &mut ValueInterval) -> bool {
        match self.current.clone() {
            Token::Number(n) => {
                if self.params.keywords_only {
                    self.diagnose(DiagnosticKind::ExpectedAllowedKeyword {
                        allowed: self.params.allowed_keywords.clone(),
                    });
                } else {
                    candidate.value = IntervalValue::Number(n);
                }
                self.get_token();
                true
            }
            Token::Keyword(k) => {
                if self.params.allowed_keywords.is_empty() {
                    self.diagnose(DiagnosticKind::ExpectedNumber);
                } else if self.params.allows_keyword(&k) {
                    candidate.value = IntervalValue::Keyword(k);
                } else {
                    self.diagnose(DiagnosticKind::ExpectedAllowedKeyword {
                        allowed: self.params.allowed_keywords.clone(),
                    });
                }
                self.get_token();
                true
            }
            _ => {
                self.diagnose(DiagnosticKind::ExpectedValue);
                false
            }
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::render_diagnostics;

    fn params(years_to_maturity: i32) -> SequenceParams {
        SequenceParams::new(years_to_maturity, 45, 65)
    }

    fn run(src: &str, params: &SequenceParams) -> ParseOutput {
        Parser::new(src, params).run()
    }

    fn ranges(out: &ParseOutput) -> Vec<(i32, i32)> {
        out.intervals.iter().map(|i| (i.begin, i.end)).collect()
    }

    #[test]
    fn single_value_runs_to_maturity() {
        let p = params(5);
        let out = run("0", &p);
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        assert_eq!(ranges(&out), vec![(0, 5)]);
        assert_eq!(out.intervals[0].value, IntervalValue::Number(0.0));
        assert_eq!(out.intervals[0].begin_mode, DurationMode::Inception);
        assert_eq!(out.intervals[0].end_mode, DurationMode::Maturity);
    }

    #[test]
    fn spans_continue_from_previous_boundary() {
        let p = params(10);
        let out = run("1 3; 7 5; 0;", &p);
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        assert_eq!(ranges(&out), vec![(0, 3), (3, 5), (5, 6)]);
        let values: Vec<_> = out.intervals.iter().map(|i| i.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                IntervalValue::Number(1.0),
                IntervalValue::Number(7.0),
                IntervalValue::Number(0.0),
            ]
        );
        // The null duration inherits the mode of the boundary before it.
        assert_eq!(out.intervals[2].begin_mode, DurationMode::Duration);
    }

    #[test]
    fn comma_before_duration_is_optional() {
        let p = params(10);
        assert_eq!(
            ranges(&run("1, 3; 7, 5", &p)),
            ranges(&run("1 3; 7 5", &p))
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        let p = params(10);
        let out = run("", &p);
        assert!(out.intervals.is_empty());
        assert!(out.diagnostics.is_empty());
        let out = run("   ", &p);
        assert!(out.intervals.is_empty());
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn rejected_span_does_not_advance_boundary() {
        let p = params(10);
        let out = run("5 3; 2 1;", &p);
        assert_eq!(ranges(&out), vec![(0, 3)]);
        assert_eq!(
            render_diagnostics(&out.diagnostics),
            "Interval [ 3, 1 ) is improper: it ends before it begins. \
             Current token ';' at position 9.\n"
        );

        // The following span still starts at 3.
        let out = run("5 3; 2 1; 4 6", &p);
        assert_eq!(ranges(&out), vec![(0, 3), (3, 6)]);
    }

    #[test]
    fn missing_close_bracket_is_reported() {
        let p = params(10);
        let out = run("1[2,5 7", &p);
        assert!(out.intervals.is_empty());
        assert_eq!(
            render_diagnostics(&out.diagnostics),
            "Expected ')' or ']'. Current token 'number' at position 7.\n\
             Expected ';'. Current token 'number' at position 7.\n"
        );
    }

    #[test]
    fn unknown_character_stops_the_parse() {
        let p = params(10);
        let out = run("1 3; 2 $ 5; 4", &p);
        assert_eq!(ranges(&out), vec![(0, 3)]);
        let kinds: Vec<_> = out.diagnostics.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnknownToken { found: '$' },
                DiagnosticKind::ExpectedDuration,
                DiagnosticKind::ExpectedSeparator,
            ]
        );
    }

    #[test]
    fn plus_signed_value_stops_the_parse() {
        let p = params(10);
        let out = run("1 3; +5 6", &p);
        assert_eq!(ranges(&out), vec![(0, 3)]);
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::UnknownToken { found: '+' }
        );
        assert_eq!(
            out.diagnostics.last().map(|d| d.kind.clone()),
            Some(DiagnosticKind::ExpectedSeparator)
        );
    }

    #[test]
    fn malformed_number_commits_span_with_zero_value() {
        let p = params(10);
        let out = run("-. 3; 1 [3, 5)", &p);
        assert_eq!(ranges(&out), vec![(0, 3), (3, 5)]);
        assert_eq!(out.intervals[0].value, IntervalValue::Number(0.0));
        assert_eq!(out.intervals[1].value, IntervalValue::Number(1.0));
        assert_eq!(
            render_diagnostics(&out.diagnostics),
            "Invalid number '-.'. Current token 'number' at position 2.\n"
        );
    }

    #[test]
    fn span_must_start_with_value() {
        let p = params(10);
        let out = run("[0, 2)", &p);
        assert!(out.intervals.is_empty());
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::ExpectedValue);
        assert_eq!(out.diagnostics[0].token, "[");
    }

    #[test]
    fn allowed_keyword_becomes_value() {
        let p = params(10).with_keywords(["glp", "sevenpay"]);
        let out = run("glp 3; 1000", &p);
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        assert_eq!(out.intervals[0].value, IntervalValue::Keyword("glp".into()));
        assert_eq!(out.intervals[1].value, IntervalValue::Number(1000.0));
        assert_eq!(ranges(&out), vec![(0, 3), (3, 10)]);
    }

    // Value-level errors are reported but do not stop the span from being
    // committed with its default value.
    #[test]
    fn value_errors_still_commit_the_span() {
        let p = params(10).with_keywords(["glp"]).keywords_only(true);
        let out = run("100 3; glp", &p);
        assert_eq!(ranges(&out), vec![(0, 3), (3, 10)]);
        assert_eq!(out.intervals[0].value, IntervalValue::Number(0.0));
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::ExpectedAllowedKeyword {
                allowed: vec!["glp".to_owned()]
            }
        );
        assert_eq!(out.diagnostics.len(), 1);

        let p = params(10).with_keywords(["glp"]);
        let out = run("cvat 4", &p);
        assert_eq!(ranges(&out), vec![(0, 4)]);
        assert_eq!(out.diagnostics.len(), 1);

        let p = params(10);
        let out = run("glp", &p);
        assert_eq!(ranges(&out), vec![(0, 10)]);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::ExpectedNumber);
    }
}
