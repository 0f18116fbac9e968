//! Raw byte sources with a single byte of pushback.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use tracing::trace;

/// Where raw bytes come from.
///
/// Both variants expose the same three operations: read the next byte, push
/// the byte just read back, and report the current byte offset. Pushback is
/// limited to exactly one byte, and that byte must be the one most recently
/// returned by [`ByteSource::next_byte`]. Breaking that rule is a bug in the
/// caller and panics.
pub enum ByteSource<'a> {
    /// A buffered stream: a file, locked standard input, or any `BufRead`.
    Stream(StreamBytes<'a>),
    /// An in-memory buffer.
    Memory(MemoryBytes<'a>),
}

impl<'a> ByteSource<'a> {
    /// Read from an in-memory buffer.
    pub fn from_bytes(buf: &'a [u8]) -> Self {
        ByteSource::Memory(MemoryBytes::new(buf))
    }

    /// Read from any buffered reader.
    ///
    /// The reader is owned for the whole parse, so byte-at-a-time reads
    /// need no further synchronization.
    pub fn from_reader(reader: impl BufRead + 'a) -> Self {
        ByteSource::Stream(StreamBytes::new(Box::new(reader)))
    }

    /// Read from an open file.
    pub fn from_file(file: File) -> Self {
        Self::from_reader(BufReader::new(file))
    }

    /// Read from standard input.
    ///
    /// The stdin lock is taken here, once, and held until the source is
    /// dropped.
    pub fn stdin() -> Self {
        Self::from_reader(io::stdin().lock())
    }

    /// Read the next byte, or `None` at end of input.
    #[inline]
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self {
            ByteSource::Stream(s) => s.next_byte(),
            ByteSource::Memory(m) => Ok(m.next_byte()),
        }
    }

    /// Push back the byte most recently returned by [`Self::next_byte`].
    ///
    /// # Panics
    ///
    /// Panics if `byte` is not the byte just read, or if a byte is already
    /// pending.
    #[inline]
    pub fn unread(&mut self, byte: u8) {
        match self {
            ByteSource::Stream(s) => s.unread(byte),
            ByteSource::Memory(m) => m.unread(byte),
        }
    }

    /// Byte offset of the next byte to be read.
    #[inline]
    pub fn offset(&self) -> usize {
        match self {
            ByteSource::Stream(s) => s.offset(),
            ByteSource::Memory(m) => m.offset(),
        }
    }
}

impl std::fmt::Debug for ByteSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteSource::Stream(s) => f
                .debug_struct("Stream")
                .field("pos", &s.pos)
                .field("pending", &s.pending)
                .finish_non_exhaustive(),
            ByteSource::Memory(m) => f
                .debug_struct("Memory")
                .field("len", &m.buf.len())
                .field("pos", &m.pos)
                .finish(),
        }
    }
}

/// Byte source over a buffered stream.
pub struct StreamBytes<'a> {
    reader: Box<dyn BufRead + 'a>,
    /// Bytes handed out so far, minus a pending pushback.
    pos: usize,
    /// The byte most recently returned, if any.
    last: Option<u8>,
    /// Single pushback slot.
    pending: Option<u8>,
}

impl<'a> StreamBytes<'a> {
    fn new(reader: Box<dyn BufRead + 'a>) -> Self {
        Self {
            reader,
            pos: 0,
            last: None,
            pending: None,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            self.pos += 1;
            return Ok(Some(byte));
        }

        let byte = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if byte.is_some() {
            self.reader.consume(1);
            self.pos += 1;
        }
        self.last = byte;
        Ok(byte)
    }

    fn unread(&mut self, byte: u8) {
        assert!(
            self.pending.is_none(),
            "stream source can only push back one byte"
        );
        assert_eq!(
            self.last,
            Some(byte),
            "stream source can only push back the byte just read"
        );
        trace!(byte, pos = self.pos, "unread");
        self.pending = Some(byte);
        self.pos -= 1;
    }

    fn offset(&self) -> usize {
        self.pos
    }
}

/// Byte source over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct MemoryBytes<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> MemoryBytes<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.buf.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    fn unread(&mut self, byte: u8) {
        assert!(self.pos > 0, "memory source has nothing to push back");
        self.pos -= 1;
        assert_eq!(
            self.buf[self.pos], byte,
            "memory source can only push back the byte just read"
        );
        trace!(byte, pos = self.pos, "unread");
    }

    fn offset(&self) -> usize {
        self.pos
    }
}
