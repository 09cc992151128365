//! Knot value types.
//!
//! A [`Value`] is a literal plus its own optional type annotation; nodes and
//! values carry annotations independently. Numbers keep enough structure to
//! round-trip their semantic content: a decimal preserves its sign, its
//! fractional digit count (so `12.340` keeps its leading-zero padding and
//! width), and its exponent; a based literal preserves its radix.
//! Byte-exact preservation of the original spelling (`+` signs, digit
//! separators, hex case) is out of scope.

use std::fmt;

/// A literal with its optional `(type)` annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// Type annotation attached to this value, already unquoted.
    pub type_hint: Option<String>,
    pub literal: Literal,
}

impl Value {
    /// A value with no type annotation.
    pub fn new(literal: Literal) -> Self {
        Self {
            type_hint: None,
            literal,
        }
    }

    pub fn with_hint(literal: Literal, hint: impl Into<String>) -> Self {
        Self {
            type_hint: Some(hint.into()),
            literal,
        }
    }
}

/// The literal payload of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    /// Decoded text: escapes resolved, quotes and raw-string delimiters gone.
    String(String),
    Number(Number),
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Value::new(literal)
    }
}

/// A parsed numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Decimal(Decimal),
    Based(Based),
}

/// `sign? digits ('.' digits)? (('e'|'E') sign? digits)?` with the digit
/// separators stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct Decimal {
    pub negative: bool,
    pub integral: u128,
    /// Fractional magnitude; only meaningful when `fraction_digits > 0`.
    pub fraction: u128,
    /// Number of fractional digits as written, including leading zeros, so
    /// `0.05` (fraction 5, two digits) is distinct from `0.5`.
    pub fraction_digits: u32,
    pub exponent: Option<Exponent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exponent {
    pub negative: bool,
    pub magnitude: u128,
}

/// A `0b`/`0o`/`0x` integer literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Based {
    pub radix: Radix,
    pub magnitude: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Octal,
    Hex,
}

impl Radix {
    /// The literal prefix that introduces this radix.
    pub fn prefix(self) -> &'static str {
        match self {
            Radix::Binary => "0b",
            Radix::Octal => "0o",
            Radix::Hex => "0x",
        }
    }

    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Hex => 16,
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
