//! Lexing of section headers and variable names.

use gitcfg_source::{is_key_char, is_space};

use crate::Source;
use crate::error::{Failure, SyntaxErrorKind};
use crate::value::parse_value;

/// Lex a section header, starting right after the `[`.
///
/// Appends the canonical section name to `name`: the base name lowercased,
/// and for `[base "sub"]` a `.` followed by the subsection exactly as
/// written. The legacy `[base.sub]` form is lowercased as a whole.
pub(crate) fn section_header(source: &mut Source<'_>, name: &mut Vec<u8>) -> Result<(), Failure> {
    source.set_subsection_case_sensitive(false);
    loop {
        let c = source.next_char()?;
        if source.is_eof() {
            return Err(SyntaxErrorKind::BadSectionHeader.into());
        }
        if c == b']' {
            return Ok(());
        }
        if is_space(c) {
            return extended_subsection(source, name, c);
        }
        if !is_key_char(c) && c != b'.' {
            return Err(SyntaxErrorKind::BadSectionHeader.into());
        }
        name.push(c.to_ascii_lowercase());
    }
}

/// Lex `"subsection"]` after the whitespace `c` that ended the base name.
fn extended_subsection(source: &mut Source<'_>, name: &mut Vec<u8>, mut c: u8) -> Result<(), Failure> {
    source.set_subsection_case_sensitive(true);
    loop {
        if c == b'\n' {
            return Err(incomplete_line(source));
        }
        c = source.next_char()?;
        if !is_space(c) {
            break;
        }
    }

    if c != b'"' {
        return Err(SyntaxErrorKind::BadSectionHeader.into());
    }
    name.push(b'.');

    loop {
        let mut c = source.next_char()?;
        if c == b'\n' {
            return Err(incomplete_line(source));
        }
        if c == b'"' {
            break;
        }
        if c == b'\\' {
            c = source.next_char()?;
            if c == b'\n' {
                return Err(incomplete_line(source));
            }
        }
        name.push(c);
    }

    if source.next_char()? != b']' {
        return Err(SyntaxErrorKind::BadSectionHeader.into());
    }
    Ok(())
}

// The newline has already bumped the line counter; report the header's line.
fn incomplete_line(source: &mut Source<'_>) -> Failure {
    source.rewind_line();
    SyntaxErrorKind::IncompleteSubsection.into()
}

/// Lex the rest of a variable line, after its first letter.
///
/// Appends the lowercased remainder of the variable name to `name` and
/// returns the value: `None` for a bare `key`, `Some` for `key = value`.
pub(crate) fn entry(source: &mut Source<'_>, name: &mut Vec<u8>) -> Result<Option<Vec<u8>>, Failure> {
    let mut c = loop {
        let c = source.next_char()?;
        if source.is_eof() || !is_key_char(c) {
            break c;
        }
        name.push(c.to_ascii_lowercase());
    };

    while c == b' ' || c == b'\t' {
        c = source.next_char()?;
    }

    if c == b'\n' {
        return Ok(None);
    }
    if c != b'=' {
        return Err(SyntaxErrorKind::BadKey.into());
    }
    parse_value(source).map(Some)
}
