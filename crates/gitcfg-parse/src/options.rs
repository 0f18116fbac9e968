//! Options for a single parse.

use std::fmt;

use crate::Event;

/// Error type callbacks use to abort a parse.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Signature of the event callback.
pub type EventFn<'a> = dyn FnMut(Event) -> Result<(), BoxError> + 'a;

/// What to do once a syntax error has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorAction {
    /// The error is fatal: the program must not continue.
    ///
    /// The parser still returns normally; see
    /// [`ConfigError::die_if_fatal`](crate::ConfigError::die_if_fatal) for
    /// the boundary helper that terminates the process.
    Die,
    /// Log one diagnostic line and return the error.
    LogAndFail,
    /// Return the error without logging it.
    Silent,
}

/// Options for parsing one config source.
#[derive(Default)]
pub struct ParseOptions<'a> {
    /// Whether include directives should be followed (default: false).
    ///
    /// The parser itself never looks at this or the other flags below; they
    /// are carried for the callers that do.
    pub respect_includes: bool,

    /// Skip repository-level config (default: false)
    pub ignore_repo: bool,

    /// Skip worktree-level config (default: false)
    pub ignore_worktree: bool,

    /// Skip config given on the command line (default: false)
    pub ignore_cmdline: bool,

    /// Tolerate an unreadable system config (default: false)
    pub system_gently: bool,

    /// Include every remote-URL conditional without checking (default: false)
    pub unconditional_remote_url: bool,

    /// Receives a span for every lexical event (default: none).
    pub event_fn: Option<Box<EventFn<'a>>>,

    /// Overrides the source's default error action (default: none).
    pub error_action: Option<ErrorAction>,
}

impl<'a> ParseOptions<'a> {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an event callback.
    pub fn on_event(mut self, f: impl FnMut(Event) -> Result<(), BoxError> + 'a) -> Self {
        self.event_fn = Some(Box::new(f));
        self
    }

    /// Override the error action for this parse.
    pub fn error_action(mut self, action: ErrorAction) -> Self {
        self.error_action = Some(action);
        self
    }
}

impl fmt::Debug for ParseOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("respect_includes", &self.respect_includes)
            .field("ignore_repo", &self.ignore_repo)
            .field("ignore_worktree", &self.ignore_worktree)
            .field("ignore_cmdline", &self.ignore_cmdline)
            .field("system_gently", &self.system_gently)
            .field("unconditional_remote_url", &self.unconditional_remote_url)
            .field("event_fn", &self.event_fn.as_ref().map(|_| "<callback>"))
            .field("error_action", &self.error_action)
            .finish()
    }
}
