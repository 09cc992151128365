//! Lexical primitives over a materialized scalar-value buffer.
//!
//! The grammar backtracks freely, so the input is held fully in memory as a
//! `Vec<char>` and the cursor is a plain index: a snapshot is a [`Mark`]
//! (one `usize` copy) and restoring it is an assignment. A true streaming
//! cursor would need unbounded lookahead here anyway, because a raw string's
//! closing delimiter length is chosen by the document.
//!
//! Besides cursor movement this module owns the two string scanners:
//!
//! - [`Reader::read_escaped_string`] decodes a double-quoted body, resolving
//!   `\n \r \t \\ \/ \" \b \f` and `\u{...}` escapes, and consumes the
//!   closing quote without surfacing it.
//! - [`Reader::read_raw_string`] matches `r#*"` ... `"#*` with the same
//!   number of hashes on both sides, copying the body verbatim.

use crate::chars;
use crate::error::{ParseError, Result};

/// A restorable cursor position. Cheap to copy; restoring never re-scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// Forward reader over the input's Unicode scalar values.
pub struct Reader {
    buf: Vec<char>,
    pos: usize,
}

impl Reader {
    pub fn new(text: &str) -> Self {
        Self {
            buf: text.chars().collect(),
            pos: 0,
        }
    }

    /// Current offset in scalar values; used for error reporting.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.buf.get(self.pos).copied()
    }

    /// Look `n` scalar values past the cursor without consuming.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.buf.get(self.pos + n).copied()
    }

    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Consume `ch` if it is next.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an exact literal, or leave the cursor untouched.
    pub fn eat_literal(&mut self, literal: &str) -> bool {
        let mut offset = 0;
        for ch in literal.chars() {
            if self.peek_at(offset) != Some(ch) {
                return false;
            }
            offset += 1;
        }
        self.pos += offset;
        true
    }

    /// Consume one newline token. A CRLF pair collapses into a single token.
    pub fn eat_newline(&mut self) -> bool {
        match self.peek() {
            Some('\r') => {
                self.pos += 1;
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
                true
            }
            Some(ch) if chars::is_newline(ch) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Decode a double-quoted string body. The opening `"` must already be
    /// consumed; the closing `"` is consumed but not included in the result.
    /// `start` is the offset of the opening quote, for error reporting.
    pub fn read_escaped_string(&mut self, start: usize) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.read_escape()?),
                Some(ch) => out.push(ch),
            }
        }
    }

    /// Decode one escape sequence, cursor positioned just after the `\`.
    fn read_escape(&mut self) -> Result<char> {
        let at = self.pos - 1;
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('"') => Ok('"'),
            Some('b') => Ok('\u{8}'),
            Some('f') => Ok('\u{C}'),
            Some('u') => self.read_unicode_escape(at),
            _ => Err(ParseError::InvalidEscapeSequence(at)),
        }
    }

    /// `\u{H..H}` with one to six hex digits naming a Unicode scalar value.
    /// `at` is the offset of the introducing `\`.
    fn read_unicode_escape(&mut self, at: usize) -> Result<char> {
        if !self.eat('{') {
            return Err(ParseError::InvalidUnicodeEscape(at));
        }
        let mut code: u32 = 0;
        let mut digits = 0;
        while let Some(ch) = self.peek() {
            if ch == '}' {
                break;
            }
            let digit = ch
                .to_digit(16)
                .ok_or(ParseError::InvalidUnicodeEscape(at))?;
            code = code * 16 + digit;
            digits += 1;
            if digits > 6 {
                return Err(ParseError::InvalidUnicodeEscape(at));
            }
            self.pos += 1;
        }
        if digits == 0 || !self.eat('}') {
            return Err(ParseError::InvalidUnicodeEscape(at));
        }
        char::from_u32(code).ok_or(ParseError::InvalidUnicodeEscape(at))
    }

    /// Scan a raw string if the cursor sits on one: `r`, N hashes, `"`,
    /// verbatim body, `"` followed by exactly N hashes. Returns `Ok(None)`
    /// with the cursor untouched when the `r#*"` introducer is not present
    /// (the token is then free to match as a bare identifier instead).
    pub fn read_raw_string(&mut self) -> Result<Option<String>> {
        let start = self.mark();
        if !self.eat('r') {
            return Ok(None);
        }
        let mut hashes = 0;
        while self.eat('#') {
            hashes += 1;
        }
        if !self.eat('"') {
            self.reset(start);
            return Ok(None);
        }
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString(start.0)),
                Some('"') => {
                    let close = self.mark();
                    let mut matched = 0;
                    while matched < hashes && self.eat('#') {
                        matched += 1;
                    }
                    if matched == hashes {
                        return Ok(Some(out));
                    }
                    // Not the closing delimiter; the quote and any hashes
                    // are literal content.
                    self.reset(close);
                    out.push('"');
                }
                Some(ch) => out.push(ch),
            }
        }
    }
}
