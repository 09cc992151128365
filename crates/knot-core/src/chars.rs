//! Character classification for the Knot grammar.
//!
//! Pure predicates partitioning Unicode scalar values into the sets the
//! grammar cares about: horizontal whitespace, newlines, digits per radix,
//! and the characters that may not appear in a bare identifier. Everything
//! downstream (reader, parser, serializer) shares these definitions so the
//! two sides of a round trip can never disagree about what needs quoting.

/// Horizontal whitespace: tab, space, NBSP, and the Unicode space separators.
/// Newlines are classified separately.
pub fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\u{9}' | '\u{20}' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

/// Line terminators: CR, LF, NEL, FF, LS, PS. A CRLF pair counts as a single
/// newline; that collapsing happens in the reader, not here.
pub fn is_newline(ch: char) -> bool {
    matches!(ch, '\u{A}' | '\u{C}' | '\u{D}' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

pub fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// Characters that can never appear in a bare identifier: whitespace,
/// newlines, the reserved punctuation, and non-printable codepoints.
pub fn is_identifier_illegal(ch: char) -> bool {
    if is_whitespace(ch) || is_newline(ch) {
        return true;
    }
    if matches!(
        ch,
        '\\' | '/' | '(' | ')' | '{' | '}' | '<' | '>' | ';' | '[' | ']' | '=' | '"'
    ) {
        return true;
    }
    // Remaining C0 controls and DEL are outside the printable range.
    (ch as u32) < 0x20 || ch == '\u{7F}'
}

/// Characters that cannot *start* a bare identifier. Digits are legal inside
/// an identifier but not at the front; `-` and `+` may lead only when the
/// next character is not a digit (checked by the parser, which has lookahead).
pub fn is_non_initial(ch: char) -> bool {
    is_identifier_illegal(ch) || is_digit(ch)
}
