//! What the entry callback receives.

use std::path::Path;

use bstr::BStr;

use crate::Origin;

/// One `key` or `key = value` line, as handed to the entry callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Canonical name: `section[.subsection].key`, with section and key
    /// lowercased.
    pub name: &'a BStr,
    /// The value, or `None` if the line had no `=` at all. An empty value
    /// (`key =`) is `Some("")`.
    pub value: Option<&'a BStr>,
    /// Line the entry ended on. This is the line it started on unless the
    /// value was continued with a trailing backslash.
    pub line: usize,
    /// Origin of the source.
    pub origin: Origin,
    /// Diagnostic name of the source.
    pub source_name: &'a str,
    /// Path of the source, if it is a file.
    pub path: Option<&'a Path>,
    /// Whether the subsection was written quoted, and so is case sensitive.
    pub subsection_case_sensitive: bool,
}
