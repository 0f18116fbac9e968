//! Turning a lexer failure into a reported [`SyntaxError`].

use tracing::{debug, error, trace};

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::{ErrorAction, Source};

/// Build the diagnostic for `kind` at the source's current position and
/// apply the error action: the override if there is one, otherwise the
/// source's default.
///
/// Only `LogAndFail` prints the message here. A fatal error is printed by
/// [`ConfigError::die_if_fatal`](crate::ConfigError::die_if_fatal).
pub(crate) fn report(
    source: &Source<'_>,
    kind: SyntaxErrorKind,
    offset: usize,
    action_override: Option<ErrorAction>,
) -> SyntaxError {
    let action = action_override.unwrap_or(source.default_action());
    let err = SyntaxError::new(
        kind,
        source.line(),
        source.origin(),
        source.name(),
        offset,
        action,
    );

    match action {
        ErrorAction::Die => debug!(%kind, offset, "fatal config error: {err}"),
        ErrorAction::LogAndFail => error!(%kind, offset, "{err}"),
        ErrorAction::Silent => trace!(%kind, offset, "{err}"),
    }
    err
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::Origin;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged(action: ErrorAction) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let source = Source::memory(Origin::Blob, "test", b"");
            report(&source, SyntaxErrorKind::BadKey, 0, Some(action));
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_and_fail_logs_one_error() {
        let out = logged(ErrorAction::LogAndFail);
        assert_eq!(out.matches("ERROR").count(), 1, "{out}");
        assert!(out.contains("bad config line 1 in blob test"), "{out}");
    }

    #[test]
    fn test_die_leaves_printing_to_the_boundary() {
        let out = logged(ErrorAction::Die);
        assert!(!out.contains("ERROR"), "{out}");
        assert!(!out.contains("fatal: "), "{out}");
    }

    #[test]
    fn test_silent_is_quiet() {
        assert_eq!(logged(ErrorAction::Silent), "");
    }
}
