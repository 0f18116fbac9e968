//! Character classes used by the config grammar.
//!
//! ASCII-only and locale independent. `is_space` differs from
//! [`u8::is_ascii_whitespace`]: form feed is not whitespace here.

/// Whitespace as the config grammar sees it: space, tab, newline and
/// carriage return.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

/// Characters allowed in section and variable names.
#[inline]
pub fn is_key_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-'
}
