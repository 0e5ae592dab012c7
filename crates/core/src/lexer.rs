//! Scanner for the input-sequence language.
//!
//! The scanner is pull-based: the parser asks for one token at a time and
//! only the most recent token is kept. The source is walked once, with at
//! most one character pushed back.

use crate::error::DiagnosticKind;
use std::fmt;

/// The eight reserved punctuation characters.
pub const PUNCTUATION: [char; 8] = [';', ',', '[', '(', ']', ')', '@', '#'];

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// One of [`PUNCTUATION`].
    Punct(char),
    Number(f64),
    /// `[a-z][a-z0-9_]*`
    Keyword(String),
    /// End of input
    Eof,
    /// Before the first token is read; also returned for an unknown character.
    Start,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Punct(c) => TokenKind::Punct(*c),
            Token::Number(_) => TokenKind::Number,
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Eof => TokenKind::Eof,
            Token::Start => TokenKind::Start,
        }
    }

    pub fn is_punct(&self, c: char) -> bool {
        matches!(self, Token::Punct(p) if *p == c)
    }
}

/// A token stripped of its payload, used for expectations and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Punct(char),
    Number,
    Keyword,
    Eof,
    Start,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Punct(c) => write!(f, "{}", c),
            TokenKind::Number => f.write_str("number"),
            TokenKind::Keyword => f.write_str("keyword"),
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Start => f.write_str("SOT"),
        }
    }
}

/// A lexical problem. Scanning still yields `recovered` so parsing can go on.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: DiagnosticKind,
    pub recovered: Token,
}

pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.src[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn push_back(&mut self, c: char) {
        self.pos -= c.len_utf8();
    }

    /// Scan one token, skipping leading whitespace.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(c) = self.bump() else {
                return Ok(Token::Eof);
            };
            if c.is_whitespace() {
                continue;
            }
            return match c {
                '0'..='9' | '.' | '-' => {
                    self.push_back(c);
                    self.scan_number()
                }
                'a'..='z' => Ok(self.scan_keyword(c)),
                c if PUNCTUATION.contains(&c) => Ok(Token::Punct(c)),
                other => Err(LexError {
                    kind: DiagnosticKind::UnknownToken { found: other },
                    recovered: Token::Start,
                }),
            };
        }
    }

    fn digits_from(&self, at: usize) -> usize {
        self.src.as_bytes()[at.min(self.src.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    }

    /// Longest literal matching `-? (d+ (. d*)? | . d+) ([eE] [+-]? d+)?`.
    fn scan_number(&mut self) -> Result<Token, LexError> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut end = start;

        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        let int_digits = self.digits_from(end);
        end += int_digits;

        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = self.digits_from(end + 1);
            if int_digits + frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }

        if int_digits + frac_digits == 0 {
            // Nothing numeric here: swallow the run of sign and point
            // characters so the parser still makes progress.
            let junk = bytes[start..]
                .iter()
                .take_while(|b| matches!(b, b'-' | b'.'))
                .count()
                .max(1);
            self.pos = start + junk;
            return Err(LexError {
                kind: DiagnosticKind::InvalidNumber {
                    text: self.src[start..self.pos].to_owned(),
                },
                recovered: Token::Number(0.0),
            });
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_digits = self.digits_from(exp);
            if exp_digits > 0 {
                end = exp + exp_digits;
            }
        }

        self.pos = end;
        let text = &self.src[start..end];
        match text.parse::<f64>() {
            Ok(n) => Ok(Token::Number(n)),
            Err(_) => Err(LexError {
                kind: DiagnosticKind::InvalidNumber {
                    text: text.to_owned(),
                },
                recovered: Token::Number(0.0),
            }),
        }
    }

    fn scan_keyword(&mut self, first: char) -> Token {
        let start = self.pos - first.len_utf8();
        while let Some(c) = self.bump() {
            if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
                self.push_back(c);
                break;
            }
        }
        Token::Keyword(self.src[start..self.pos].to_owned())
    }
}
