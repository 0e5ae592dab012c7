use super::Parser;
use crate::ast::DurationMode;
use crate::duration::{resolve_scalar, Bounds, RawScalar, ResolveContext, ResolvedScalar};
use crate::error::DiagnosticKind;
use crate::lexer::{Token, TokenKind};

impl<'a> Parser<'a> {
    fn resolve_context(&self) -> ResolveContext {
        ResolveContext {
            issue_age: self.params.issue_age,
            retirement_age: self.params.retirement_age,
            years_to_maturity: self.params.years_to_maturity,
            last_resolved_duration: self.last_resolved_duration,
        }
    }

    /// Candidate bounds for the current span, or `None` if the duration is
    /// too malformed to form a range at all.
    pub(super) fn parse_duration(&mut self) -> Option<Bounds> {
        let begin = self.last_resolved_duration;
        match self.current {
            Token::Punct('[') | Token::Punct('(') => self.parse_bracketed(),
            Token::Punct('@') | Token::Punct('#') | Token::Number(_) | Token::Keyword(_) => {
                let end = self.parse_duration_scalar();
                Some(Bounds {
                    begin,
                    begin_mode: self.previous_mode,
                    end: end.duration,
                    end_mode: end.mode,
                })
            }
            // One-year step.
            Token::Punct(';') => Some(Bounds {
                begin,
                begin_mode: self.previous_mode,
                end: begin.saturating_add(1),
                end_mode: DurationMode::Duration,
            }),
            // Last span with no duration holds until maturity.
            Token::Eof => Some(Bounds {
                begin,
                begin_mode: self.previous_mode,
                end: self.params.years_to_maturity,
                end_mode: DurationMode::Maturity,
            }),
            _ => {
                self.diagnose(DiagnosticKind::ExpectedDuration);
                None
            }
        }
    }

    /// `[` and `]` include their endpoint, `(` and `)` exclude it; the
    /// result is always half-open.
    fn parse_bracketed(&mut self) -> Option<Bounds> {
        let begin_exclusive = self.current.is_punct('(');
        self.get_token();

        let begin = self.parse_duration_scalar();
        self.expect(TokenKind::Punct(','));
        let end = self.parse_duration_scalar();

        let end_inclusive = match self.current {
            Token::Punct(']') => true,
            Token::Punct(')') => false,
            _ => {
                self.diagnose(DiagnosticKind::ExpectedCloseBracket);
                return None;
            }
        };
        self.get_token();

        Some(Bounds {
            begin: begin.duration.saturating_add(i32::from(begin_exclusive)),
            begin_mode: begin.mode,
            end: end.duration.saturating_add(i32::from(end_inclusive)),
            end_mode: end.mode,
        })
    }

    fn parse_duration_scalar(&mut self) -> ResolvedScalar {
        let raw = match self.current.clone() {
            Token::Punct('@') => {
                self.get_token();
                self.take_integer().map(RawScalar::AttainedAge)
            }
            Token::Punct('#') => {
                self.get_token();
                self.take_integer().map(RawScalar::NumberOfYears)
            }
            Token::Number(_) => self.take_integer().map(RawScalar::Duration),
            Token::Keyword(k) => {
                let raw = match k.as_str() {
                    "retirement" => Some(RawScalar::Retirement),
                    "maturity" => Some(RawScalar::Maturity),
                    _ => {
                        self.diagnose(DiagnosticKind::ExpectedDurationKeyword);
                        None
                    }
                };
                self.get_token();
                raw
            }
            _ => {
                self.diagnose(DiagnosticKind::ExpectedDurationScalar);
                None
            }
        };
        match raw {
            Some(raw) => resolve_scalar(raw, &self.resolve_context()),
            None => ResolvedScalar::INVALID,
        }
    }

    /// Consume a number token holding a whole value that fits in `i32`.
    fn take_integer(&mut self) -> Option<i32> {
        let Token::Number(n) = self.current else {
            self.expect(TokenKind::Number);
            return None;
        };
        self.get_token();
        if n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
            Some(n as i32)
        } else {
            self.diagnose(DiagnosticKind::NonIntegralDuration { found: n });
            None
        }
    }
}
