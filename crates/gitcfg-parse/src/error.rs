//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{BoxError, ErrorAction, Origin};

/// Anything that can stop a parse.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input is malformed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// An entry or event callback asked to stop.
    #[error("config parsing aborted by callback: {0}")]
    Aborted(#[source] BoxError),

    /// Reading the underlying stream failed.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// The config file could not be opened.
    #[error("unable to open config file '{}': {source}", .path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Why it failed.
        source: io::Error,
    },
}

impl ConfigError {
    /// Whether this is a syntax error whose action is [`ErrorAction::Die`].
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConfigError::Syntax(e) if e.action == ErrorAction::Die)
    }

    /// Terminate the process if this error is fatal, otherwise hand it back.
    ///
    /// Prints `fatal: <message>` to stderr and exits with status 128. Meant
    /// for the outermost layer of an application; libraries should check
    /// [`Self::is_fatal`] instead.
    pub fn die_if_fatal(self) -> Self {
        if self.is_fatal() {
            eprintln!("fatal: {self}");
            std::process::exit(128);
        }
        self
    }
}

/// A syntax error, already phrased for the user.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// Line the error was detected on (1-based).
    pub line: usize,
    /// Origin of the offending source.
    pub origin: Origin,
    /// Diagnostic name of the offending source.
    pub source_name: String,
    /// Byte offset of the character that triggered the error.
    pub offset: usize,
    /// How the error is to be handled.
    pub action: ErrorAction,
    message: String,
}

impl SyntaxError {
    pub(crate) fn new(
        kind: SyntaxErrorKind,
        line: usize,
        origin: Origin,
        source_name: &str,
        offset: usize,
        action: ErrorAction,
    ) -> Self {
        let message = match origin {
            Origin::Stdin => format!("bad config line {line} in {origin}"),
            Origin::Unknown => format!("bad config line {line} in {source_name}"),
            _ => format!("bad config line {line} in {origin} {source_name}"),
        };
        Self {
            kind,
            line,
            origin,
            source_name: source_name.to_owned(),
            offset,
            action,
            message,
        }
    }

    /// The one-line diagnostic, e.g. `bad config line 3 in file .gitconfig`.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The specific reason a source was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// The input starts with part of a UTF-8 byte-order mark.
    #[error("incomplete byte-order mark")]
    PartialBom,
    /// A line starts with something that is not a section, variable,
    /// comment or whitespace.
    #[error("unexpected character {}", show_byte(.0))]
    UnexpectedCharacter(u8),
    /// A section header contains an invalid character or is not closed.
    #[error("invalid section header")]
    BadSectionHeader,
    /// A section header has no name.
    #[error("empty section name")]
    EmptySectionName,
    /// A quoted subsection name runs into the end of the line.
    #[error("incomplete subsection name")]
    IncompleteSubsection,
    /// A variable name is followed by something other than `=` or a
    /// newline.
    #[error("invalid character after variable name")]
    BadKey,
    /// A value has an open quote at the end of its line.
    #[error("unterminated quoted value")]
    UnterminatedQuote,
    /// A value contains a backslash escape that is not recognized.
    #[error("unknown escape sequence \\{}", show_byte(.0))]
    UnknownEscape(u8),
    /// The source exceeded the maximum length.
    #[error("config source is too long")]
    TooLong,
}

fn show_byte(b: &u8) -> String {
    std::ascii::escape_default(*b).to_string()
}

/// Internal failure carried out of the lexers.
#[derive(Debug)]
pub(crate) enum Failure {
    Syntax(SyntaxErrorKind),
    Io(io::Error),
    /// The event callback asked to stop.
    Aborted(BoxError),
    /// The entry callback asked to stop.
    EntryRejected(BoxError),
}

impl From<SyntaxErrorKind> for Failure {
    fn from(kind: SyntaxErrorKind) -> Self {
        Failure::Syntax(kind)
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Failure::Io(e)
    }
}
