use super::*;
use crate::{ErrorAction, Event, Origin, SourceHooks, SyntaxError, parse_source};
use gitcfg_testhelpers::{entry_lines, init_tracing};

type Entries = Vec<(Vec<u8>, Option<Vec<u8>>)>;

fn run(source: &mut Source<'_>, options: &mut ParseOptions<'_>) -> (Entries, Result<(), ConfigError>) {
    init_tracing();
    let mut entries = Entries::new();
    let result = parse_source(source, options, &mut (), |entry| {
        entries.push((entry.name.to_vec(), entry.value.map(|v| v.to_vec())));
        Ok(())
    });
    (entries, result)
}

fn parse(input: &[u8]) -> (Entries, Result<(), ConfigError>) {
    let mut source = Source::memory(Origin::Blob, "test", input);
    run(&mut source, &mut ParseOptions::new().error_action(ErrorAction::Silent))
}

fn lines(entries: &Entries) -> String {
    entry_lines(entries.iter().map(|(n, v)| (n.as_slice(), v.as_deref())))
}

fn parse_ok(input: &str) -> String {
    let (entries, result) = parse(input.as_bytes());
    result.unwrap();
    lines(&entries)
}

fn parse_err(input: &[u8]) -> SyntaxError {
    match parse(input).1 {
        Err(ConfigError::Syntax(e)) => e,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

/// Every delivered event as `(kind, covered text)`.
fn events(input: &str) -> Vec<(EventKind, &str)> {
    init_tracing();
    let mut seen = Vec::new();
    {
        let mut options = ParseOptions::new()
            .error_action(ErrorAction::Silent)
            .on_event(|e: Event| {
                seen.push(e);
                Ok(())
            });
        let mut source = Source::memory(Origin::Blob, "test", input.as_bytes());
        let _ = parse_source(&mut source, &mut options, &mut (), |_| Ok(()));
    }
    seen.into_iter()
        .map(|e| (e.kind, &input[e.span.start..e.span.end]))
        .collect()
}

#[test]
fn test_canonical_names() {
    assert_eq!(
        parse_ok("[Foo \"Bar\"]\n\tBaz = qux\n"),
        "foo.Bar.baz=\"qux\"\n"
    );
    assert_eq!(parse_ok("[Core]\nFileMode = true\n"), "core.filemode=\"true\"\n");
    assert_eq!(parse_ok("[Branch.Main]\nremote = o\n"), "branch.main.remote=\"o\"\n");
}

#[test]
fn test_absent_and_empty_values() {
    assert_eq!(parse_ok("[core]\n\tbare\n"), "core.bare\n");
    assert_eq!(parse_ok("[core]\n\tbare"), "core.bare\n");
    assert_eq!(parse_ok("[core]\n\tbare =\n"), "core.bare=\"\"\n");
}

#[test]
fn test_quoted_value_and_trailing_comment() {
    assert_eq!(parse_ok("[s]\nk = \"  a  \" ; c\n"), "s.k=\"  a  \"\n");
    assert_eq!(parse_ok("[s]\nk = a # c\nj = b;c\n"), "s.k=\"a\"\ns.j=\"b\"\n");
}

#[test]
fn test_value_whitespace_collapses_to_spaces() {
    assert_eq!(parse_ok("[s]\nk = a\tb\n"), "s.k=\"a b\"\n");
    assert_eq!(parse_ok("[s]\nk = a \t b \t\n"), "s.k=\"a   b\"\n");
    assert_eq!(parse_ok("[s]\nk = \"a\tb\"\n"), "s.k=\"a\\tb\"\n");
}

#[test]
fn test_section_persists_across_entries() {
    assert_eq!(
        parse_ok("[a]\nx = 1\n\n# note\ny = 2\n[b \"c\"]\nz = 3\n"),
        "a.x=\"1\"\na.y=\"2\"\nb.c.z=\"3\"\n"
    );
}

#[test]
fn test_entry_before_any_section() {
    assert_eq!(parse_ok("k = v\n"), "k=\"v\"\n");
}

#[test]
fn test_crlf_input() {
    assert_eq!(parse_ok("[s]\r\nk = v\r\nj\r\n"), "s.k=\"v\"\ns.j\n");
}

#[test]
fn test_unknown_escape() {
    let err = parse_err(b"[s]\nk = a\\x\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnknownEscape(b'x'));
    assert_eq!(err.line, 2);
    assert_eq!(err.to_string(), "bad config line 2 in blob test");
}

#[test]
fn test_unterminated_quote_reports_its_line() {
    let err = parse_err(b"[s]\nk = \"open\nj = 1\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnterminatedQuote);
    assert_eq!(err.line, 2);

    let err = parse_err(b"[s]\nk = \"open");
    assert_eq!(err.kind, SyntaxErrorKind::UnterminatedQuote);
    assert_eq!(err.line, 2);
}

#[test]
fn test_bom_is_skipped() {
    assert_eq!(parse_ok("\u{feff}[s]\nk = v\n"), "s.k=\"v\"\n");
}

#[test]
fn test_partial_bom() {
    for input in [&b"\xef\xbb[s]\n"[..], &b"\xef[s]\n"[..]] {
        let err = parse_err(input);
        assert_eq!(err.kind, SyntaxErrorKind::PartialBom);
        assert_eq!(err.line, 1);
    }
}

#[test]
fn test_bom_only_at_start() {
    let err = parse_err("[s]\n\u{feff}k = v\n".as_bytes());
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCharacter(0xef));
}

#[test]
fn test_empty_section_name() {
    let err = parse_err(b"[]\n");
    assert_eq!(err.kind, SyntaxErrorKind::EmptySectionName);
    assert_eq!(err.offset, 1);
}

#[test]
fn test_unexpected_character() {
    let err = parse_err(b"[s]\n=oops\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCharacter(b'='));
    assert_eq!(err.line, 2);
    assert_eq!(err.offset, 4);

    let err = parse_err(b"1key = v\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCharacter(b'1'));
}

#[test]
fn test_entries_before_error_are_delivered() {
    let (entries, result) = parse(b"[s]\na = 1\nb c\nd = 2\n");
    assert_eq!(lines(&entries), "s.a=\"1\"\n");
    match result {
        Err(ConfigError::Syntax(e)) => {
            assert_eq!(e.kind, SyntaxErrorKind::BadKey);
            assert_eq!(e.line, 3);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_whitespace_runs_coalesce() {
    assert_eq!(
        events("  \n\t[s]\n"),
        vec![
            (EventKind::Whitespace, "  \n\t"),
            (EventKind::Section, "[s]"),
            (EventKind::Whitespace, "\n"),
        ]
    );
}

#[test]
fn test_blank_lines_are_one_event() {
    assert_eq!(
        events("[s]\n\n\n[t]\n"),
        vec![
            (EventKind::Section, "[s]"),
            (EventKind::Whitespace, "\n\n\n"),
            (EventKind::Section, "[t]"),
            (EventKind::Whitespace, "\n"),
        ]
    );
}

#[test]
fn test_bom_is_outside_every_span() {
    assert_eq!(
        events("\u{feff}[s]\n"),
        vec![(EventKind::Section, "[s]"), (EventKind::Whitespace, "\n")]
    );
}

#[test]
fn test_entry_span_includes_newline() {
    assert_eq!(
        events("[s]\nk = v\n"),
        vec![
            (EventKind::Section, "[s]"),
            (EventKind::Whitespace, "\n"),
            (EventKind::Entry, "k = v\n"),
        ]
    );
}

#[test]
fn test_comment_spans() {
    assert_eq!(
        events("# hi\n[s]\n"),
        vec![
            (EventKind::Comment, "# hi"),
            (EventKind::Whitespace, "\n"),
            (EventKind::Section, "[s]"),
            (EventKind::Whitespace, "\n"),
        ]
    );
}

#[test]
fn test_events_cover_input() {
    let input = "; top\n[core]\n\tbare = false ; why\n\n[remote \"o\"]\n\turl = x\n";
    let covered: String = events(input).into_iter().map(|(_, text)| text).collect();
    assert_eq!(covered, input);
}

#[test]
fn test_error_flushes_pending_event() {
    assert_eq!(
        events("[s]\nk v\n"),
        vec![
            (EventKind::Section, "[s]"),
            (EventKind::Whitespace, "\n"),
            (EventKind::Entry, "k "),
        ]
    );
}

#[test]
fn test_parse_without_event_callback() {
    let (entries, result) = parse(b"[s]\nk\n");
    result.unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_entry_callback_abort_stops_immediately() {
    init_tracing();

    struct LastLine(usize);
    impl SourceHooks for LastLine {
        fn after_parse(&mut self, source: &Source<'_>) {
            self.0 = source.line();
        }
    }

    let mut calls = 0;
    let mut hooks = LastLine(0);
    let mut source = Source::memory(Origin::Blob, "test", b"[s]\na=1\nb=2\nc=3\n");
    let result = parse_source(&mut source, &mut ParseOptions::new(), &mut hooks, |_| {
        calls += 1;
        if calls == 2 {
            Err("stop".into())
        } else {
            Ok(())
        }
    });

    assert_eq!(calls, 2);
    match result {
        Err(ConfigError::Aborted(e)) => assert_eq!(e.to_string(), "stop"),
        other => panic!("expected abort, got {other:?}"),
    }
    assert_eq!(hooks.0, 3);
}

#[test]
fn test_rejected_entry_span_is_delivered() {
    init_tracing();
    let mut seen = Vec::new();
    let input = "[s]\na=1\nb=2\n";
    let result = {
        let mut options = ParseOptions::new().on_event(|e: Event| {
            seen.push(e);
            Ok(())
        });
        let mut source = Source::memory(Origin::Blob, "test", input.as_bytes());
        parse_source(&mut source, &mut options, &mut (), |_| Err("rejected".into()))
    };

    assert!(matches!(result, Err(ConfigError::Aborted(_))));
    let spans: Vec<_> = seen
        .iter()
        .map(|e| (e.kind, &input[e.span.start..e.span.end]))
        .collect();
    assert_eq!(
        spans,
        vec![
            (EventKind::Section, "[s]"),
            (EventKind::Whitespace, "\n"),
            (EventKind::Entry, "a=1"),
        ]
    );
}

#[test]
fn test_event_callback_abort() {
    init_tracing();
    let mut options = ParseOptions::new().on_event(|e: Event| {
        if e.kind == EventKind::Entry {
            Err("no entries please".into())
        } else {
            Ok(())
        }
    });
    let mut source = Source::memory(Origin::Blob, "test", b"[s]\nk = v\nj = w\n");
    let mut calls = 0;
    let result = parse_source(&mut source, &mut options, &mut (), |_| {
        calls += 1;
        Ok(())
    });
    // The entry event is flushed when the next element starts.
    assert_eq!(calls, 1);
    assert!(matches!(result, Err(ConfigError::Aborted(_))));
}

#[test]
fn test_parsing_is_idempotent() {
    let input = b"[a \"B\"]\n\tx = \"1 \" ;c\n\ty\n[c]\nz = a\\tb\n";
    let (first, r1) = parse(input);
    let (second, r2) = parse(input);
    r1.unwrap();
    r2.unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_default_actions() {
    let mut source = Source::memory(Origin::Blob, "test", b"[");
    match run(&mut source, &mut ParseOptions::new()).1 {
        Err(ConfigError::Syntax(e)) => assert_eq!(e.action, ErrorAction::LogAndFail),
        other => panic!("expected a syntax error, got {other:?}"),
    }

    let mut source = Source::reader(Origin::CommandLine, "-c", &b"["[..]);
    let err = run(&mut source, &mut ParseOptions::new()).1.unwrap_err();
    assert!(err.is_fatal());
    // End of input counts as a line.
    assert_eq!(err.to_string(), "bad config line 2 in command line -c");
}

#[test]
fn test_error_action_override() {
    let mut source = Source::memory(Origin::Blob, "test", b"[");
    let err = run(&mut source, &mut ParseOptions::new().error_action(ErrorAction::Die))
        .1
        .unwrap_err();
    assert!(err.is_fatal());

    let mut source = Source::reader(Origin::Blob, "test", &b"["[..]);
    let err = run(&mut source, &mut ParseOptions::new().error_action(ErrorAction::Silent))
        .1
        .unwrap_err();
    assert!(!err.is_fatal());
}

#[test]
fn test_length_cap() {
    let input = b"[s]\nk=v\n";

    let mut source = Source::memory(Origin::Blob, "test", input).with_max_len(5);
    let (entries, result) = run(&mut source, &mut ParseOptions::new());
    assert!(entries.is_empty());
    match result {
        Err(ConfigError::Syntax(e)) => assert_eq!(e.kind, SyntaxErrorKind::TooLong),
        other => panic!("expected a syntax error, got {other:?}"),
    }

    let mut source = Source::memory(Origin::Blob, "test", input).with_max_len(input.len());
    let (entries, result) = run(&mut source, &mut ParseOptions::new());
    result.unwrap();
    assert_eq!(lines(&entries), "s.k=\"v\"\n");
}

#[test]
fn test_entry_metadata() {
    init_tracing();
    let mut seen = Vec::new();
    let mut source = Source::memory(Origin::SubmoduleBlob, "abc", b"[a \"B\"]\nx=1\n[c.d]\n\ny=2\n");
    parse_source(&mut source, &mut ParseOptions::new(), &mut (), |entry| {
        assert_eq!(entry.origin, Origin::SubmoduleBlob);
        assert_eq!(entry.source_name, "abc");
        assert_eq!(entry.path, None);
        seen.push((entry.name.to_string(), entry.line, entry.subsection_case_sensitive));
        Ok(())
    })
    .unwrap();
    assert_eq!(
        seen,
        vec![("a.B.x".to_string(), 2, true), ("c.d.y".to_string(), 5, false)]
    );
}

#[test]
fn test_continued_value_reports_last_line() {
    init_tracing();
    let mut seen = Vec::new();
    let mut source = Source::memory(Origin::Blob, "test", b"[s]\nk = a\\\n b\nj\n");
    parse_source(&mut source, &mut ParseOptions::new(), &mut (), |entry| {
        seen.push((entry.name.to_string(), entry.value.map(|v| v.to_string()), entry.line));
        Ok(())
    })
    .unwrap();
    assert_eq!(
        seen,
        vec![
            ("s.k".to_string(), Some("a b".to_string()), 3),
            ("s.j".to_string(), None, 4),
        ]
    );
}
