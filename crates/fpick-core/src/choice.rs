#![forbid(unsafe_code)]

//! Candidate lines.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// One selectable line of text.
///
/// A choice is normalized when it is created: surrounding whitespace is
/// stripped, and raw bytes that are not valid UTF-8 become the empty string.
/// Cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Choice(Arc<str>);

impl Choice {
    /// Create a choice from text, trimming surrounding whitespace.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text.trim()))
    }

    /// Create a choice from raw input bytes.
    ///
    /// Invalid UTF-8 yields an empty choice rather than an error, so a single
    /// bad line never aborts the whole list.
    #[must_use]
    pub fn normalize(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::new(text),
            Err(_) => Self(Arc::from("")),
        }
    }

    /// The normalized text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Choice {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Choice {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Choice {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Choice {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split raw input on `\n` and normalize every line.
///
/// A trailing newline does not produce an extra empty choice; blank lines in
/// the middle do.
#[must_use]
pub fn choices_from_bytes(bytes: &[u8]) -> Vec<Choice> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n').map(Choice::normalize).collect()
}
