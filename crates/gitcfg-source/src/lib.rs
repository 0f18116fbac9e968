//! Byte sources and character normalization for git-style config files.
//!
//! This crate is the bottom layer of the parser: it hands out one
//! normalized byte at a time, folding `\r\n` into `\n`, synthesizing a final
//! newline at end of input and tracking line numbers.

mod byte_source;
pub use byte_source::{ByteSource, MemoryBytes, StreamBytes};

mod chars;
pub use chars::{is_key_char, is_space};

mod origin;
pub use origin::Origin;

mod reader;
pub use reader::{CharReader, DEFAULT_MAX_LEN};

mod span;
pub use span::Span;
