#![forbid(unsafe_code)]

//! Choice loading.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use fpick_core::Choice;
use fpick_core::choice::choices_from_bytes;

/// Read every line of `reader` as a choice.
///
/// Lines are split on `\n` and trimmed (which also drops a `\r`); blank lines
/// stay as empty choices so positions are preserved. Invalid UTF-8 lines
/// become empty choices.
pub fn load_choices<R: Read>(mut reader: R) -> io::Result<Vec<Choice>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let choices = choices_from_bytes(&bytes);
    tracing::debug!(bytes = bytes.len(), choices = choices.len(), "choices loaded");
    Ok(choices)
}

/// Load choices from `path`, or from standard input when `path` is `None`.
pub fn load_from(path: Option<&Path>) -> io::Result<Vec<Choice>> {
    match path {
        Some(path) => load_choices(File::open(path)?),
        None => load_choices(io::stdin().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn texts(input: &[u8]) -> Vec<String> {
        load_choices(Cursor::new(input.to_vec()))
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn splits_and_trims_lines() {
        assert_eq!(texts(b"one\n  two \nthree\n"), ["one", "two", "three"]);
    }

    #[test]
    fn crlf_input() {
        assert_eq!(texts(b"one\r\ntwo\r\n"), ["one", "two"]);
    }

    #[test]
    fn blank_lines_are_kept() {
        assert_eq!(texts(b"a\n\nb"), ["a", "", "b"]);
    }

    #[test]
    fn empty_input_has_no_choices() {
        assert!(texts(b"").is_empty());
    }

    #[test]
    fn invalid_utf8_line_is_empty() {
        assert_eq!(texts(b"ok\n\xff\xfe\nfine\n"), ["ok", "", "fine"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_from(Some(Path::new("/nonexistent/fpick/choices"))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
