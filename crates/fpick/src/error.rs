#![forbid(unsafe_code)]

//! Errors that end a run with exit status 2.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Why a run failed.
#[derive(Debug)]
pub enum Error {
    /// The choice source could not be read.
    Input {
        /// File that failed, `None` for standard input.
        path: Option<PathBuf>,
        /// Underlying failure.
        source: io::Error,
    },
    /// The terminal could not be set up, read or written.
    Terminal(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input {
                path: Some(path),
                source,
            } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Input { path: None, source } => {
                write!(f, "cannot read standard input: {source}")
            }
            Self::Terminal(err) => write!(f, "terminal error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input { source, .. } => Some(source),
            Self::Terminal(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Terminal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_names_the_source() {
        let err = Error::Input {
            path: Some(PathBuf::from("list.txt")),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot read list.txt: gone");

        let err = Error::Input {
            path: None,
            source: io::Error::other("closed"),
        };
        assert_eq!(err.to_string(), "cannot read standard input: closed");
    }

    #[test]
    fn terminal_errors_convert() {
        let err: Error = io::Error::other("no tty").into();
        assert_eq!(err.to_string(), "terminal error: no tty");
        assert!(err.source().is_some());
    }
}
