//! Test helpers shared by the gitcfg crates.

use std::sync::Once;

use bstr::ByteSlice;

static INIT: Once = Once::new();

/// Install a tracing subscriber for the current test binary.
///
/// Output goes through the test writer so it only shows up for failing
/// tests. Filtering follows `RUST_LOG` and defaults to `debug`. Safe to call
/// from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        // Another harness may already have installed a global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Render bytes for assertion messages, escaping anything non-printable.
pub fn show_bytes(bytes: &[u8]) -> String {
    format!("{:?}", bytes.as_bstr())
}

/// Join `name=value` pairs one per line, writing a bare `name` when there
/// is no value.
///
/// Handy for comparing a parse against an inline snapshot.
pub fn entry_lines<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a [u8], Option<&'a [u8]>)>,
{
    let mut out = String::new();
    for (name, value) in entries {
        out.push_str(&name.to_str_lossy());
        if let Some(value) = value {
            out.push('=');
            out.push_str(&format!("{:?}", value.as_bstr()));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_bytes_escapes() {
        assert_eq!(show_bytes(b"a\nb"), r#""a\nb""#);
    }

    #[test]
    fn test_entry_lines() {
        let lines = entry_lines([
            (&b"core.bare"[..], Some(&b"false"[..])),
            (&b"core.flag"[..], None),
        ]);
        assert_eq!(lines, "core.bare=\"false\"\ncore.flag\n");
    }
}
