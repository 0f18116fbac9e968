//! Callback-driven streaming parser for git-style config files.
//!
//! ```text
//! # comment
//! [core]
//!     bare = false
//! [remote "origin"]
//!     url = "https://example.com/repo.git"  ; trailing comment
//! ```
//!
//! Every variable is reported to an entry callback as a canonical name
//! (`core.bare`, `remote.origin.url`) and an optional value. An optional
//! event callback receives the byte span of every section, entry, comment
//! and whitespace run, which is enough to rewrite a file without losing
//! anything.
//!
//! ```
//! use gitcfg_parse::{Origin, ParseOptions, parse_buffer};
//!
//! let mut names = Vec::new();
//! parse_buffer(
//!     Origin::Blob,
//!     "example",
//!     b"[Core]\n\tBare = false\n",
//!     &mut ParseOptions::new(),
//!     &mut (),
//!     |entry| {
//!         names.push(entry.name.to_string());
//!         Ok(())
//!     },
//! )
//! .unwrap();
//! assert_eq!(names, ["core.bare"]);
//! ```

use std::fs::File;
use std::path::Path;

use tracing::debug;

pub use gitcfg_source::{Origin, Span};

mod diagnostic;

mod emitter;

mod entry;
pub use entry::Entry;

mod error;
pub use error::{ConfigError, SyntaxError, SyntaxErrorKind};

mod event;
pub use event::{Event, EventKind};

mod name;

mod options;
pub use options::{BoxError, ErrorAction, EventFn, ParseOptions};

mod parser;
pub use parser::Parser;

mod report;

mod source;
pub use source::Source;

mod value;

/// Hooks run around a parse, e.g. to record the final line number.
pub trait SourceHooks {
    /// Called after the source is set up, before the first character is
    /// read.
    fn before_parse(&mut self, _source: &Source<'_>) {}

    /// Called once parsing has stopped, whatever the outcome.
    fn after_parse(&mut self, _source: &Source<'_>) {}
}

/// No hooks.
impl SourceHooks for () {}

/// Parse an already set up [`Source`].
pub fn parse_source<F>(
    source: &mut Source<'_>,
    options: &mut ParseOptions<'_>,
    hooks: &mut impl SourceHooks,
    on_entry: F,
) -> Result<(), ConfigError>
where
    F: FnMut(&Entry<'_>) -> Result<(), BoxError>,
{
    hooks.before_parse(source);
    let result = Parser::new(source, options).parse(on_entry);
    hooks.after_parse(source);
    result
}

/// Parse the config file at `path`.
///
/// Syntax errors default to [`ErrorAction::Die`].
pub fn parse_file<F>(
    path: impl AsRef<Path>,
    options: &mut ParseOptions<'_>,
    hooks: &mut impl SourceHooks,
    on_entry: F,
) -> Result<(), ConfigError>
where
    F: FnMut(&Entry<'_>) -> Result<(), BoxError>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        debug!(?path, %source, "cannot open config file");
        ConfigError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut source = Source::file(path, file);
    parse_source(&mut source, options, hooks, on_entry)
}

/// Parse an in-memory buffer.
///
/// Syntax errors default to [`ErrorAction::LogAndFail`].
pub fn parse_buffer<F>(
    origin: Origin,
    name: &str,
    buf: &[u8],
    options: &mut ParseOptions<'_>,
    hooks: &mut impl SourceHooks,
    on_entry: F,
) -> Result<(), ConfigError>
where
    F: FnMut(&Entry<'_>) -> Result<(), BoxError>,
{
    let mut source = Source::memory(origin, name, buf);
    parse_source(&mut source, options, hooks, on_entry)
}

/// Parse standard input.
///
/// Stdin stays locked for the duration of the parse. Syntax errors default
/// to [`ErrorAction::Die`].
pub fn parse_stdin<F>(
    options: &mut ParseOptions<'_>,
    hooks: &mut impl SourceHooks,
    on_entry: F,
) -> Result<(), ConfigError>
where
    F: FnMut(&Entry<'_>) -> Result<(), BoxError>,
{
    let mut source = Source::stdin();
    parse_source(&mut source, options, hooks, on_entry)
}
