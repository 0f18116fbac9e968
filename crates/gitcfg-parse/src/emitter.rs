//! Turns parser transitions into `(kind, span)` events.

use tracing::trace;

use crate::{BoxError, Event, EventFn, EventKind, Span};

/// Coalesces parser transitions into spans.
///
/// A span's end is only known once the next element starts, so every
/// event is delivered one transition late: recording a new kind flushes the
/// previous one. `EndOfInput` doubles as the initial "nothing pending"
/// state.
#[derive(Debug)]
pub(crate) struct EventEmitter {
    previous: EventKind,
    previous_offset: usize,
}

impl EventEmitter {
    pub(crate) fn new() -> Self {
        Self {
            previous: EventKind::EndOfInput,
            previous_offset: 0,
        }
    }

    /// Record a transition to `kind`. `offset` is the byte offset of the
    /// reader, which has already consumed the character that triggered the
    /// transition (except at end of input).
    pub(crate) fn emit(
        &mut self,
        kind: EventKind,
        offset: usize,
        sink: Option<&mut EventFn<'_>>,
    ) -> Result<(), BoxError> {
        let Some(sink) = sink else {
            return Ok(());
        };

        if kind == EventKind::Whitespace && self.previous == EventKind::Whitespace {
            return Ok(());
        }

        let offset = if kind == EventKind::EndOfInput {
            offset
        } else {
            offset - 1
        };

        if self.previous != EventKind::EndOfInput {
            let event = Event {
                kind: self.previous,
                span: Span::new(self.previous_offset, offset),
            };
            trace!(?event, "event");
            sink(event)?;
        }

        self.previous = kind;
        self.previous_offset = offset;
        Ok(())
    }
}
