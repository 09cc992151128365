//! Error types for Knot parsing.
//!
//! Every variant is fatal: the parse aborts, no partial tree is returned,
//! and there is no resumable state. Non-matches at grammar choice points are
//! internal control flow inside the parser and never surface here.
//!
//! Offsets count Unicode scalar values from the start of the input (the
//! parse buffer is fully materialized as scalar values, not bytes).

use thiserror::Error;

/// Errors that abort a Knot parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A quoted or raw string was never closed before end of input.
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    /// A `(type)` annotation is missing its closing `)`.
    #[error("unterminated type annotation starting at offset {0}")]
    UnterminatedTypeHint(usize),

    /// A `{` child block is missing its closing `}`.
    #[error("unterminated child block opened at offset {0}")]
    UnterminatedChildren(usize),

    /// `key=` was not followed by a valid value.
    #[error("property at offset {0} is missing a value after '='")]
    MissingPropertyValue(usize),

    /// A `\x` escape where `x` is not a recognized escape character.
    #[error("invalid escape sequence at offset {0}")]
    InvalidEscapeSequence(usize),

    /// A malformed `\u{...}` escape: bad syntax, more than six hex digits,
    /// or a codepoint that is not a Unicode scalar value.
    #[error("invalid unicode escape at offset {0}")]
    InvalidUnicodeEscape(usize),

    /// A `0b`/`0o`/`0x` prefix not immediately followed by a valid digit of
    /// that radix, or followed by characters outside it.
    #[error("malformed based literal at offset {0}")]
    MalformedBasedLiteral(usize),

    /// A token that starts like a decimal number but violates the number
    /// grammar (e.g. `1.2.3`), or a magnitude too large to represent.
    #[error("malformed number at offset {0}")]
    MalformedNumber(usize),

    /// Input remained after the last parseable node.
    #[error("expected a node at offset {0}")]
    ExpectedNode(usize),
}

/// Convenience alias used throughout knot-core.
pub type Result<T> = std::result::Result<T, ParseError>;
