//! The state of one config source while it is being parsed.

use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use gitcfg_source::{ByteSource, CharReader, Origin};

use crate::ErrorAction;
use crate::error::{Failure, SyntaxErrorKind};

/// One config source: where it came from, how to report errors in it, and
/// the normalizing reader positioned somewhere inside it.
///
/// A `Source` is meant for a single parse. Lifecycle hooks receive it by
/// reference so callers can inspect e.g. the final line number.
#[derive(Debug)]
pub struct Source<'a> {
    reader: CharReader<'a>,
    origin: Origin,
    name: String,
    path: Option<PathBuf>,
    default_action: ErrorAction,
    subsection_case_sensitive: bool,
}

impl<'a> Source<'a> {
    fn new(
        bytes: ByteSource<'a>,
        origin: Origin,
        name: String,
        path: Option<PathBuf>,
        default_action: ErrorAction,
    ) -> Self {
        Self {
            reader: CharReader::new(bytes),
            origin,
            name,
            path,
            default_action,
            subsection_case_sensitive: false,
        }
    }

    /// A source over an in-memory buffer.
    ///
    /// Errors default to [`ErrorAction::LogAndFail`].
    pub fn memory(origin: Origin, name: impl Into<String>, buf: &'a [u8]) -> Self {
        Self::new(
            ByteSource::from_bytes(buf),
            origin,
            name.into(),
            None,
            ErrorAction::LogAndFail,
        )
    }

    /// A source over any buffered stream.
    ///
    /// Errors default to [`ErrorAction::Die`].
    pub fn reader(origin: Origin, name: impl Into<String>, reader: impl BufRead + 'a) -> Self {
        Self::new(
            ByteSource::from_reader(reader),
            origin,
            name.into(),
            None,
            ErrorAction::Die,
        )
    }

    /// Override the default error action.
    pub fn with_default_action(mut self, action: ErrorAction) -> Self {
        self.default_action = action;
        self
    }

    /// Lower (or raise) the cap on the number of bytes read.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.reader = self.reader.with_max_len(max_len);
        self
    }

    /// Where this source came from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filesystem path, for file-backed sources.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current 1-based line number.
    pub fn line(&self) -> usize {
        self.reader.line()
    }

    /// Whether the end of input has been reached.
    pub fn is_eof(&self) -> bool {
        self.reader.is_eof()
    }

    /// Number of characters consumed so far.
    pub fn consumed(&self) -> usize {
        self.reader.consumed()
    }

    /// Byte offset in the underlying input.
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }

    /// Error action used when the parse options do not override it.
    pub fn default_action(&self) -> ErrorAction {
        self.default_action
    }

    /// Whether the subsection of the most recent section header was written
    /// in the quoted form, and so is case sensitive.
    pub fn subsection_case_sensitive(&self) -> bool {
        self.subsection_case_sensitive
    }

    pub(crate) fn set_subsection_case_sensitive(&mut self, sensitive: bool) {
        self.subsection_case_sensitive = sensitive;
    }

    /// Next normalized character. Exceeding the length cap is a syntax
    /// error.
    pub(crate) fn next_char(&mut self) -> Result<u8, Failure> {
        let c = self.reader.next_char()?;
        if self.reader.is_overflowed() {
            return Err(SyntaxErrorKind::TooLong.into());
        }
        Ok(c)
    }

    pub(crate) fn rewind_line(&mut self) {
        self.reader.rewind_line();
    }
}

impl Source<'static> {
    /// A source over an open file.
    ///
    /// `path` is used both as the diagnostic name and as the path.
    pub fn file(path: impl AsRef<Path>, file: File) -> Self {
        let path = path.as_ref();
        Self::new(
            ByteSource::from_file(file),
            Origin::File,
            path.display().to_string(),
            Some(path.to_path_buf()),
            ErrorAction::Die,
        )
    }

    /// A source over standard input, locked for as long as the source
    /// lives.
    pub fn stdin() -> Self {
        Self::new(
            ByteSource::stdin(),
            Origin::Stdin,
            String::new(),
            None,
            ErrorAction::Die,
        )
    }
}
