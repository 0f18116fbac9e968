//! Character normalization on top of a [`ByteSource`].

use std::io;

use tracing::{debug, trace};

use crate::ByteSource;

/// Default cap on the number of bytes a single source may contain.
///
/// Reading past it puts the reader into the overflowed state.
pub const DEFAULT_MAX_LEN: usize = i32::MAX as usize;

/// Returned by [`CharReader::next_char`] once the length cap is exceeded.
const OVERFLOW_SENTINEL: u8 = 0;

/// A normalizing reader over a [`ByteSource`].
///
/// - `\r\n` is folded into `\n`; a lone `\r` passes through.
/// - End of input is reported as a synthesized `\n` with [`Self::is_eof`]
///   set, so callers always see a terminating newline.
/// - The 1-based line number advances on every `\n`, including the
///   synthesized one.
#[derive(Debug)]
pub struct CharReader<'a> {
    bytes: ByteSource<'a>,
    line: usize,
    eof: bool,
    overflowed: bool,
    total_len: usize,
    max_len: usize,
}

impl<'a> CharReader<'a> {
    /// Create a reader positioned at line 1.
    pub fn new(bytes: ByteSource<'a>) -> Self {
        Self {
            bytes,
            line: 1,
            eof: false,
            overflowed: false,
            total_len: 0,
            max_len: DEFAULT_MAX_LEN,
        }
    }

    /// Lower (or raise) the cap on consumed bytes.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Read the next normalized character.
    pub fn next_char(&mut self) -> io::Result<u8> {
        if self.overflowed {
            return Ok(OVERFLOW_SENTINEL);
        }

        let mut c = self.bytes.next_byte()?;
        if c == Some(b'\r') {
            c = self.bytes.next_byte()?;
            if c != Some(b'\n') {
                if let Some(next) = c {
                    self.bytes.unread(next);
                }
                c = Some(b'\r');
            }
        }

        let Some(c) = c else {
            self.eof = true;
            self.line += 1;
            trace!(line = self.line, "end of input");
            return Ok(b'\n');
        };

        self.total_len += 1;
        if self.total_len > self.max_len {
            debug!(max_len = self.max_len, "source exceeds length cap");
            self.eof = true;
            self.overflowed = true;
            return Ok(OVERFLOW_SENTINEL);
        }

        if c == b'\n' {
            self.line += 1;
        }
        Ok(c)
    }

    /// Step the line counter back by one.
    ///
    /// Used after a newline has been consumed when a diagnostic should point
    /// at the line the construct started on.
    #[inline]
    pub fn rewind_line(&mut self) {
        self.line -= 1;
    }

    /// Current 1-based line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether end of input has been reached (or forced).
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Whether the length cap was exceeded.
    #[inline]
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Number of characters consumed so far (a folded `\r\n` counts once).
    #[inline]
    pub fn consumed(&self) -> usize {
        self.total_len
    }

    /// Byte offset in the underlying source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.bytes.offset()
    }
}
