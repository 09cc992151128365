//! The Knot grammar engine.
//!
//! A recursive-descent parser over the [`Reader`], emitting events to a
//! [`Visitor`]. The grammar, informally:
//!
//! ```text
//! Document   = LineSpace (Node LineSpace)*
//! Node       = SlashDash? TypeHint? Identifier
//!              (NodeSpace (SlashDash? (Property | Value)))*
//!              NodeSpace? ChildBlock?
//! ChildBlock = SlashDash? NodeSpace? '{' Document '}'
//! Property   = Identifier '=' Value
//! Value      = TypeHint? (RawString | EscapedString | Number | Keyword)
//! TypeHint   = '(' Identifier ')'
//! ```
//!
//! # Key design decisions
//!
//! - **Backtracking discipline**: every multi-branch rule snapshots the
//!   cursor and restores it when an alternative fails. Soft non-matches are
//!   `Ok(None)`/`Ok(false)`; fatal errors are `Err` and abort the parse.
//! - **Commit-then-emit**: a rule emits its events only after it has fully
//!   matched, so a prefix of emitted events always corresponds to a prefix
//!   of consumed input. Value parsing returns data and lets the caller emit,
//!   which keeps the property rule atomic (`key=` with a bad value emits
//!   nothing before the fatal error).
//! - **Engine-side slashdash**: a `/-`-prefixed unit is parsed and validated
//!   in full with emission switched off (`live = false`), then reported as a
//!   single `unit_skipped` event. Visitors never track suppression depth.
//! - **Numbers as tokens**: a number-like token (optional sign, then a
//!   digit) is scanned to its full identifier-character extent first and
//!   then parsed strictly, so `1.2.3` fails as a malformed number instead of
//!   splitting into surprising pieces. The raw token text travels with the
//!   decoded value for lossless consumers.

use crate::chars;
use crate::error::{ParseError, Result};
use crate::event::{Keyword, Visitor};
use crate::reader::Reader;
use crate::value::{Based, Decimal, Exponent, Number, Radix};

/// Parse `text`, delivering the event stream to `visitor`.
///
/// Runs to completion as one atomic unit: either the whole input is consumed
/// and `document_end` was delivered, or a fatal [`ParseError`] is returned
/// and the document must be treated as unparseable.
pub fn parse_into<V: Visitor + ?Sized>(text: &str, visitor: &mut V) -> Result<()> {
    Parser {
        r: Reader::new(text),
        v: visitor,
    }
    .run()
}

/// A fully parsed value, held until the surrounding rule commits.
struct ParsedValue {
    hint: Option<String>,
    literal: ParsedLiteral,
}

enum ParsedLiteral {
    Str(String),
    Num(Number, String),
    Kw(Keyword),
}

struct Parser<'v, V: ?Sized> {
    r: Reader,
    v: &'v mut V,
}

impl<V: Visitor + ?Sized> Parser<'_, V> {
    fn run(mut self) -> Result<()> {
        self.v.document_begin();
        self.document(true)?;
        if !self.r.at_end() {
            return Err(ParseError::ExpectedNode(self.r.pos()));
        }
        self.v.document_end();
        Ok(())
    }

    /// `Document = LineSpace (Node LineSpace)*`. Used at the top level and
    /// inside child blocks; the caller checks what terminated it.
    fn document(&mut self, live: bool) -> Result<()> {
        self.line_space();
        while self.node(live)? {
            self.line_space();
        }
        Ok(())
    }

    /// One node, or `Ok(false)` with the cursor restored.
    fn node(&mut self, live: bool) -> Result<bool> {
        let start = self.r.mark();
        let sd = self.slash_dash();
        let node_live = live && !sd;
        let hint = self.type_hint()?;
        let name = match self.identifier()? {
            Some(name) => name,
            None => {
                self.r.reset(start);
                return Ok(false);
            }
        };
        if node_live {
            if let Some(hint) = &hint {
                self.v.type_hint(hint);
            }
            self.v.node(&name);
        }
        self.node_items(node_live)?;
        if node_live {
            self.v.node_end();
        } else if sd && live {
            self.v.unit_skipped();
        }
        Ok(true)
    }

    /// The entries and optional child block of a node. Ends (cursor restored
    /// to before any trailing space) when nothing further matches.
    fn node_items(&mut self, live: bool) -> Result<()> {
        loop {
            let before = self.r.mark();
            let had_space = self.node_space();

            // Child block; the space before it is optional.
            let block = self.r.mark();
            let sd = self.slash_dash();
            if sd {
                self.node_space();
            }
            let open = self.r.pos();
            if self.r.eat('{') {
                let block_live = live && !sd;
                if block_live {
                    self.v.children_begin();
                }
                self.document(block_live)?;
                if !self.r.eat('}') {
                    return Err(if self.r.at_end() {
                        ParseError::UnterminatedChildren(open)
                    } else {
                        ParseError::ExpectedNode(self.r.pos())
                    });
                }
                if block_live {
                    self.v.children_end();
                } else if sd && live {
                    self.v.unit_skipped();
                }
                return Ok(());
            }
            self.r.reset(block);

            // Entries require spacing between siblings.
            if !had_space {
                self.r.reset(before);
                return Ok(());
            }
            let sd = self.slash_dash();
            if !self.prop_or_value(live && !sd, sd && live)? {
                self.r.reset(before);
                return Ok(());
            }
        }
    }

    /// `Property | Value`. A matched identifier without `=` rolls back and
    /// retries as a value; a matched `identifier '='` commits to the
    /// property rule, so a missing value is fatal.
    fn prop_or_value(&mut self, live: bool, skipped: bool) -> Result<bool> {
        let start = self.r.mark();
        if let Some(key) = self.identifier()? {
            if self.r.eat('=') {
                let at = self.r.pos();
                return match self.value()? {
                    Some(value) => {
                        if live {
                            self.v.property(&key);
                            self.emit_value(&value);
                        } else if skipped {
                            self.v.unit_skipped();
                        }
                        Ok(true)
                    }
                    None => Err(ParseError::MissingPropertyValue(at)),
                };
            }
            self.r.reset(start);
        }
        match self.value()? {
            Some(value) => {
                if live {
                    self.emit_value(&value);
                } else if skipped {
                    self.v.unit_skipped();
                }
                Ok(true)
            }
            None => {
                self.r.reset(start);
                Ok(false)
            }
        }
    }

    /// `Value = TypeHint? (RawString | EscapedString | Number | Keyword)`,
    /// alternatives tried in that priority. Returns data instead of emitting
    /// so callers control the commit point.
    fn value(&mut self) -> Result<Option<ParsedValue>> {
        let start = self.r.mark();
        let hint = self.type_hint()?;
        let literal = if let Some(text) = self.r.read_raw_string()? {
            ParsedLiteral::Str(text)
        } else if let Some(text) = self.escaped_string()? {
            ParsedLiteral::Str(text)
        } else if let Some((number, raw)) = self.number()? {
            ParsedLiteral::Num(number, raw)
        } else if let Some(keyword) = self.keyword() {
            ParsedLiteral::Kw(keyword)
        } else {
            self.r.reset(start);
            return Ok(None);
        };
        Ok(Some(ParsedValue { hint, literal }))
    }

    fn emit_value(&mut self, value: &ParsedValue) {
        if let Some(hint) = &value.hint {
            self.v.type_hint(hint);
        }
        match &value.literal {
            ParsedLiteral::Str(text) => self.v.value_string(text),
            ParsedLiteral::Num(number, raw) => self.v.value_number(number, raw),
            ParsedLiteral::Kw(keyword) => self.v.value_keyword(*keyword),
        }
    }

    /// `TypeHint = '(' Identifier ')'`; a `(` commits the rule, so anything
    /// but an identifier and a closing `)` is fatal.
    fn type_hint(&mut self) -> Result<Option<String>> {
        let start = self.r.pos();
        if !self.r.eat('(') {
            return Ok(None);
        }
        let name = self
            .identifier()?
            .ok_or(ParseError::UnterminatedTypeHint(start))?;
        if !self.r.eat(')') {
            return Err(ParseError::UnterminatedTypeHint(start));
        }
        Ok(Some(name))
    }

    /// Identifier position: raw string, escaped string, bare identifier, in
    /// that priority.
    fn identifier(&mut self) -> Result<Option<String>> {
        if let Some(text) = self.r.read_raw_string()? {
            return Ok(Some(text));
        }
        if let Some(text) = self.escaped_string()? {
            return Ok(Some(text));
        }
        Ok(self.bare_identifier())
    }

    /// A double-quoted string, or `Ok(None)` when the cursor is not on `"`.
    fn escaped_string(&mut self) -> Result<Option<String>> {
        let start = self.r.pos();
        if !self.r.eat('"') {
            return Ok(None);
        }
        self.r.read_escaped_string(start).map(Some)
    }

    /// A bare identifier: no leading digit, no `-`/`+` directly before a
    /// digit, and the reserved words `true`/`false`/`null` are rejected so
    /// the keyword rule can claim them in value position.
    fn bare_identifier(&mut self) -> Option<String> {
        let start = self.r.mark();
        let first = self.r.peek()?;
        if chars::is_non_initial(first) {
            return None;
        }
        if matches!(first, '-' | '+') && self.r.peek_at(1).is_some_and(chars::is_digit) {
            return None;
        }
        let mut text = String::new();
        while let Some(ch) = self.r.peek() {
            if chars::is_identifier_illegal(ch) {
                break;
            }
            text.push(ch);
            self.r.bump();
        }
        if matches!(text.as_str(), "true" | "false" | "null") {
            self.r.reset(start);
            return None;
        }
        Some(text)
    }

    /// `true`, `false`, or `null`, not running into a longer bare token.
    fn keyword(&mut self) -> Option<Keyword> {
        let words = [
            ("true", Keyword::True),
            ("false", Keyword::False),
            ("null", Keyword::Null),
        ];
        for (word, keyword) in words {
            let start = self.r.mark();
            if self.r.eat_literal(word) {
                match self.r.peek() {
                    Some(ch) if !chars::is_identifier_illegal(ch) => self.r.reset(start),
                    _ => return Some(keyword),
                }
            }
        }
        None
    }

    /// A numeric token: number-like start (optional sign, then a digit),
    /// scanned to its full extent, then parsed strictly.
    fn number(&mut self) -> Result<Option<(Number, String)>> {
        let at = self.r.pos();
        let sign = usize::from(matches!(self.r.peek(), Some('+' | '-')));
        if !self.r.peek_at(sign).is_some_and(chars::is_digit) {
            return Ok(None);
        }
        let mut raw = String::new();
        while let Some(ch) = self.r.peek() {
            if chars::is_identifier_illegal(ch) {
                break;
            }
            raw.push(ch);
            self.r.bump();
        }
        let number = parse_number_token(&raw, at)?;
        Ok(Some((number, raw)))
    }

    /// `/-`, consuming any line space after it so the suppressed unit may
    /// start on the next line.
    fn slash_dash(&mut self) -> bool {
        if self.r.eat_literal("/-") {
            self.line_space();
            true
        } else {
            false
        }
    }

    /// Space between sibling nodes: whitespace, newlines, `;` separators,
    /// and both comment forms.
    fn line_space(&mut self) {
        loop {
            match self.r.peek() {
                Some(ch) if chars::is_whitespace(ch) || chars::is_newline(ch) => {
                    self.r.bump();
                }
                Some(';') => {
                    self.r.bump();
                }
                Some('/') if self.r.peek_at(1) == Some('/') => self.single_line_comment(),
                Some('/') if self.r.peek_at(1) == Some('*') => {
                    if !self.block_comment() {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    /// Space between items on one node's line: whitespace, block comments,
    /// line continuations. Returns whether anything was consumed.
    fn node_space(&mut self) -> bool {
        let start = self.r.pos();
        loop {
            match self.r.peek() {
                Some(ch) if chars::is_whitespace(ch) => {
                    self.r.bump();
                }
                Some('/') if self.r.peek_at(1) == Some('*') => {
                    if !self.block_comment() {
                        break;
                    }
                }
                Some('\\') => {
                    if !self.line_continuation() {
                        break;
                    }
                }
                _ => break,
            }
        }
        self.r.pos() != start
    }

    /// `\` + trailing whitespace + optional `//` comment + exactly one
    /// newline. Anything else restores the cursor to the backslash.
    fn line_continuation(&mut self) -> bool {
        let start = self.r.mark();
        self.r.eat('\\');
        while let Some(ch) = self.r.peek() {
            if !chars::is_whitespace(ch) {
                break;
            }
            self.r.bump();
        }
        if self.r.peek() == Some('/') && self.r.peek_at(1) == Some('/') {
            self.single_line_comment();
        }
        if self.r.eat_newline() {
            true
        } else {
            self.r.reset(start);
            false
        }
    }

    /// `//` to end of line; the newline itself is left for the caller.
    fn single_line_comment(&mut self) {
        self.r.eat_literal("//");
        while let Some(ch) = self.r.peek() {
            if chars::is_newline(ch) {
                break;
            }
            self.r.bump();
        }
    }

    /// `/* */` with arbitrary nesting. An unterminated comment is a soft
    /// non-match (cursor restored to the `/*`), never fatal.
    fn block_comment(&mut self) -> bool {
        let start = self.r.mark();
        self.r.eat_literal("/*");
        let mut depth = 1usize;
        while depth > 0 {
            if self.r.eat_literal("*/") {
                depth -= 1;
            } else if self.r.eat_literal("/*") {
                depth += 1;
            } else if self.r.bump().is_none() {
                self.r.reset(start);
                return false;
            }
        }
        true
    }
}

/// Strict parse of a complete number token. `at` is the token's offset, used
/// in errors.
fn parse_number_token(raw: &str, at: usize) -> Result<Number> {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let radix = if body.starts_with("0b") {
        Some(Radix::Binary)
    } else if body.starts_with("0o") {
        Some(Radix::Octal)
    } else if body.starts_with("0x") {
        Some(Radix::Hex)
    } else {
        None
    };
    match radix {
        Some(radix) => {
            if negative {
                // Based literals carry no sign.
                return Err(ParseError::MalformedBasedLiteral(at));
            }
            parse_based_digits(&body[2..], radix, at).map(Number::Based)
        }
        None => parse_decimal_token(body, negative, at).map(Number::Decimal),
    }
}

/// Digits after a radix prefix: at least one valid digit immediately after
/// the prefix, then digits of that radix with `_` separators.
fn parse_based_digits(digits: &str, radix: Radix, at: usize) -> Result<Based> {
    let mut iter = digits.chars();
    let first = iter
        .next()
        .and_then(|ch| ch.to_digit(radix.base()))
        .ok_or(ParseError::MalformedBasedLiteral(at))?;
    let mut magnitude = u128::from(first);
    for ch in iter {
        if ch == '_' {
            continue;
        }
        let digit = ch
            .to_digit(radix.base())
            .ok_or(ParseError::MalformedBasedLiteral(at))?;
        magnitude = magnitude
            .checked_mul(u128::from(radix.base()))
            .and_then(|m| m.checked_add(u128::from(digit)))
            .ok_or(ParseError::MalformedNumber(at))?;
    }
    Ok(Based { radix, magnitude })
}

/// `digits ('.' digits)? (('e'|'E') sign? digits)?`, sign already stripped.
fn parse_decimal_token(body: &str, negative: bool, at: usize) -> Result<Decimal> {
    let mut rest = body;
    let (integral, _) = scan_digit_run(&mut rest, at)?;
    let mut fraction = 0;
    let mut fraction_digits = 0;
    if let Some(tail) = rest.strip_prefix('.') {
        rest = tail;
        let (value, count) = scan_digit_run(&mut rest, at)?;
        fraction = value;
        fraction_digits = count;
    }
    let mut exponent = None;
    if let Some(tail) = rest.strip_prefix(['e', 'E']) {
        let (exp_negative, tail) = match tail.strip_prefix('-') {
            Some(tail) => (true, tail),
            None => (false, tail.strip_prefix('+').unwrap_or(tail)),
        };
        rest = tail;
        let (magnitude, _) = scan_digit_run(&mut rest, at)?;
        exponent = Some(Exponent {
            negative: exp_negative,
            magnitude,
        });
    }
    if !rest.is_empty() {
        return Err(ParseError::MalformedNumber(at));
    }
    Ok(Decimal {
        negative,
        integral,
        fraction,
        fraction_digits,
        exponent,
    })
}

/// One run of decimal digits with `_` separators permitted after the first
/// digit. Returns the magnitude and the digit count (separators excluded).
fn scan_digit_run(rest: &mut &str, at: usize) -> Result<(u128, u32)> {
    let mut chars = rest.char_indices();
    let mut value: u128 = match chars.next() {
        Some((_, ch)) if ch.is_ascii_digit() => u128::from(ch as u8 - b'0'),
        _ => return Err(ParseError::MalformedNumber(at)),
    };
    let mut count = 1;
    let mut consumed = 1;
    for (idx, ch) in chars {
        if ch == '_' {
            consumed = idx + 1;
            continue;
        }
        if !ch.is_ascii_digit() {
            consumed = idx;
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(ch as u8 - b'0')))
            .ok_or(ParseError::MalformedNumber(at))?;
        count += 1;
        consumed = idx + 1;
    }
    *rest = &rest[consumed..];
    Ok((value, count))
}
