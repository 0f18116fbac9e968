//! Diagnostic rendering for syntax errors.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::{SyntaxError, SyntaxErrorKind};

impl SyntaxError {
    /// Render this error with ariadne, pointing into `source`.
    ///
    /// `source` should be the text that was parsed; the error's byte offset
    /// is clamped to it.
    pub fn render(&self, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| self.to_string())
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, source: &str, writer: W) {
        let filename = self.source_name.as_str();
        let start = self.offset.min(source.len());
        let end = (start + 1).min(source.len());
        let range = start..end;

        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(self.message())
            .with_label(
                Label::new((filename, range))
                    .with_message(self.kind.to_string())
                    .with_color(Color::Red),
            );
        let report = match help(self.kind) {
            Some(help) => report.with_help(help),
            None => report,
        };
        let _ = report.finish().write((filename, Source::from(source)), writer);
    }
}

fn help(kind: SyntaxErrorKind) -> Option<&'static str> {
    match kind {
        SyntaxErrorKind::UnknownEscape(_) => {
            Some("valid escapes are: \\\\, \\\", \\n, \\t, \\b and a backslash at the end of the line")
        }
        SyntaxErrorKind::UnterminatedQuote => Some("close the quote before the end of the line"),
        SyntaxErrorKind::BadSectionHeader | SyntaxErrorKind::IncompleteSubsection => {
            Some("section headers look like [section] or [section \"subsection\"]")
        }
        SyntaxErrorKind::BadKey => Some("variable names may only contain letters, digits and '-'"),
        _ => None,
    }
}
