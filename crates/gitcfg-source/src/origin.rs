//! Where a config source came from.

use std::fmt;

/// The kind of place a config source was read from.
///
/// Used to phrase diagnostics ("in file", "in blob", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Unknown origin.
    #[default]
    Unknown,
    /// A blob in the object database.
    Blob,
    /// A file on disk.
    File,
    /// Standard input.
    Stdin,
    /// A blob holding a submodule's configuration.
    SubmoduleBlob,
    /// Configuration passed on the command line.
    CommandLine,
}

impl Origin {
    /// Human-readable noun for this origin, as used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Origin::Unknown => "",
            Origin::Blob => "blob",
            Origin::File => "file",
            Origin::Stdin => "standard input",
            Origin::SubmoduleBlob => "submodule-blob",
            Origin::CommandLine => "command line",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
