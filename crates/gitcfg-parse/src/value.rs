//! Lexing of the right-hand side of `key = value`.

use gitcfg_source::is_space;

use crate::Source;
use crate::error::{Failure, SyntaxErrorKind};

/// Lex a value, starting right after the `=`, up to and including the
/// newline that ends it.
///
/// - Double quotes toggle quoting and are never part of the value.
/// - Outside quotes, `#` and `;` start a comment that runs to the end of
///   the line.
/// - Outside quotes, leading and trailing whitespace is dropped, and each
///   whitespace character between value characters becomes one space.
/// - `\t`, `\b`, `\n`, `\\` and `\"` are escapes; a backslash before a
///   newline continues the value on the next line. Any other escape is an
///   error.
pub(crate) fn parse_value(source: &mut Source<'_>) -> Result<Vec<u8>, Failure> {
    let mut value = Vec::new();
    let mut quoted = false;
    let mut comment = false;
    // Unquoted whitespace not yet written; dropped if the value ends first.
    let mut pending_spaces = 0;

    loop {
        let mut c = source.next_char()?;
        if c == b'\n' {
            if quoted {
                source.rewind_line();
                return Err(SyntaxErrorKind::UnterminatedQuote.into());
            }
            return Ok(value);
        }
        if comment {
            continue;
        }
        if is_space(c) && !quoted {
            if !value.is_empty() {
                pending_spaces += 1;
            }
            continue;
        }
        if !quoted && (c == b';' || c == b'#') {
            comment = true;
            continue;
        }
        value.resize(value.len() + pending_spaces, b' ');
        pending_spaces = 0;
        if c == b'\\' {
            c = match source.next_char()? {
                b'\n' => continue,
                b't' => b'\t',
                b'b' => 0x08,
                b'n' => b'\n',
                c @ (b'\\' | b'"') => c,
                other => return Err(SyntaxErrorKind::UnknownEscape(other).into()),
            };
            value.push(c);
            continue;
        }
        if c == b'"' {
            quoted = !quoted;
            continue;
        }
        value.push(c);
    }
}
