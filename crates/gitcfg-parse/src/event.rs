//! Lexical events reported to the optional event callback.

use crate::Span;

/// The kind of a lexical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A section header, `[name]` or `[name "sub"]`.
    Section,
    /// A variable line, including its terminating newline.
    Entry,
    /// A run of whitespace and blank lines.
    Whitespace,
    /// A `#` or `;` comment up to the end of its line.
    Comment,
    /// End of input.
    EndOfInput,
    /// The point where parsing failed.
    Error,
}

/// A lexical event with the byte span it covers in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// What kind of element this is.
    pub kind: EventKind,
    /// Half-open byte range `[start, end)`.
    pub span: Span,
}
