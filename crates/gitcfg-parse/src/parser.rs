//! The top-level parse loop.

use bstr::ByteSlice;
use gitcfg_source::is_space;
use tracing::{debug, trace};

use crate::emitter::EventEmitter;
use crate::error::{ConfigError, Failure, SyntaxErrorKind};
use crate::report::report;
use crate::{BoxError, Entry, EventKind, ParseOptions, Source, name};

/// U+FEFF encoded as UTF-8.
const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Callback-driven parser for one config source.
///
/// Reads the source character by character, invoking the entry callback for
/// every variable in file order and the options' event callback (if any)
/// for every lexical element.
pub struct Parser<'p, 'src, 'cb> {
    source: &'p mut Source<'src>,
    options: &'p mut ParseOptions<'cb>,
    emitter: EventEmitter,
    /// Canonical name of the current variable; the first `stem_len` bytes
    /// are the current section followed by a `.`.
    key: Vec<u8>,
    stem_len: usize,
}

impl<'p, 'src, 'cb> Parser<'p, 'src, 'cb> {
    /// Create a parser over `source`.
    pub fn new(source: &'p mut Source<'src>, options: &'p mut ParseOptions<'cb>) -> Self {
        Self {
            source,
            options,
            emitter: EventEmitter::new(),
            key: Vec::new(),
            stem_len: 0,
        }
    }

    /// Parse the whole source.
    ///
    /// `on_entry` is called once per variable. Returning `Err` from it (or
    /// from the event callback) stops the parse immediately with
    /// [`ConfigError::Aborted`]; no diagnostic is produced for that case.
    /// When the entry callback stops the parse, the Error transition still
    /// happens, so the event callback receives the rejected entry's span.
    pub fn parse<F>(mut self, mut on_entry: F) -> Result<(), ConfigError>
    where
        F: FnMut(&Entry<'_>) -> Result<(), BoxError>,
    {
        debug!(
            origin = %self.source.origin(),
            name = self.source.name(),
            "parsing config source"
        );

        match self.run(&mut on_entry) {
            Ok(()) => {
                debug!(lines = self.source.line() - 1, "parsed config source");
                Ok(())
            }
            Err(Failure::Syntax(kind)) => {
                let offset = self.source.offset().saturating_sub(1);
                self.event(EventKind::Error).map_err(ConfigError::Aborted)?;
                Err(report(self.source, kind, offset, self.options.error_action).into())
            }
            Err(Failure::Io(e)) => Err(ConfigError::Io(e)),
            Err(Failure::EntryRejected(e)) => {
                debug!(line = self.source.line(), "parse aborted by entry callback");
                self.event(EventKind::Error).map_err(ConfigError::Aborted)?;
                Err(ConfigError::Aborted(e))
            }
            Err(Failure::Aborted(e)) => {
                debug!(line = self.source.line(), "parse aborted by event callback");
                Err(ConfigError::Aborted(e))
            }
        }
    }

    fn run<F>(&mut self, on_entry: &mut F) -> Result<(), Failure>
    where
        F: FnMut(&Entry<'_>) -> Result<(), BoxError>,
    {
        let mut comment = false;
        // Number of BOM bytes matched so far; `None` once past the BOM.
        let mut bom = Some(0);

        loop {
            let c = self.source.next_char()?;

            if let Some(matched) = bom {
                if c == UTF8_BOM[matched] {
                    bom = (matched + 1 < UTF8_BOM.len()).then_some(matched + 1);
                    continue;
                }
                if matched > 0 {
                    return Err(SyntaxErrorKind::PartialBom.into());
                }
                bom = None;
            }

            if c == b'\n' {
                if self.source.is_eof() {
                    self.event(EventKind::EndOfInput).map_err(Failure::Aborted)?;
                    return Ok(());
                }
                self.event(EventKind::Whitespace).map_err(Failure::Aborted)?;
                comment = false;
                continue;
            }
            if comment {
                continue;
            }
            if is_space(c) {
                self.event(EventKind::Whitespace).map_err(Failure::Aborted)?;
                continue;
            }
            if c == b'#' || c == b';' {
                self.event(EventKind::Comment).map_err(Failure::Aborted)?;
                comment = true;
                continue;
            }
            if c == b'[' {
                self.event(EventKind::Section).map_err(Failure::Aborted)?;
                self.key.clear();
                name::section_header(self.source, &mut self.key)?;
                if self.key.is_empty() {
                    return Err(SyntaxErrorKind::EmptySectionName.into());
                }
                trace!(section = %self.key.as_bstr(), "section");
                self.key.push(b'.');
                self.stem_len = self.key.len();
                continue;
            }
            if !c.is_ascii_alphabetic() {
                return Err(SyntaxErrorKind::UnexpectedCharacter(c).into());
            }

            self.event(EventKind::Entry).map_err(Failure::Aborted)?;
            self.key.truncate(self.stem_len);
            self.key.push(c.to_ascii_lowercase());
            self.entry(on_entry)?;
        }
    }

    fn entry<F>(&mut self, on_entry: &mut F) -> Result<(), Failure>
    where
        F: FnMut(&Entry<'_>) -> Result<(), BoxError>,
    {
        let value = name::entry(self.source, &mut self.key)?;

        // The line counter has already moved past the entry's newline.
        let entry = Entry {
            name: self.key.as_bstr(),
            value: value.as_deref().map(ByteSlice::as_bstr),
            line: self.source.line() - 1,
            origin: self.source.origin(),
            source_name: self.source.name(),
            path: self.source.path(),
            subsection_case_sensitive: self.source.subsection_case_sensitive(),
        };
        trace!(name = %entry.name, value = ?entry.value, line = entry.line, "entry");

        if let Err(e) = on_entry(&entry) {
            // Leave the source on the entry's line for after-parse hooks.
            self.source.rewind_line();
            return Err(Failure::EntryRejected(e));
        }
        Ok(())
    }

    fn event(&mut self, kind: EventKind) -> Result<(), BoxError> {
        let offset = self.source.offset();
        self.emitter
            .emit(kind, offset, self.options.event_fn.as_deref_mut())
    }
}

#[cfg(test)]
mod tests;
