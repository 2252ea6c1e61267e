#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args by hand. Environment variables under the `FPICK_` prefix set
//! defaults; explicit flags override them.

use std::env;
use std::fmt;
use std::path::PathBuf;

use fpick_core::SearchConfig;

/// Crate version, for `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows used when neither `--height` nor `FPICK_HEIGHT` is given.
pub const DEFAULT_HEIGHT: u16 = 21;

/// Smallest usable height: the prompt plus one match row.
pub const MIN_HEIGHT: u16 = 2;

/// Usage text for `--help`.
pub const HELP_TEXT: &str = "\
fpick - pick a line with fuzzy search

USAGE:
    fpick [OPTIONS] [FILE]
    command | fpick [OPTIONS]

Reads choices from FILE (or standard input when FILE is absent or '-'), one
per line, and prints the chosen line to standard output. The interface is
drawn on the controlling terminal.

OPTIONS:
    -s, --search=QUERY   Start with QUERY already typed
    --height=N           UI rows including the prompt (default: 21, minimum: 2)
    --height=full        Use the whole terminal height
    -i, --ignore-case    Match regardless of case
    --wrap               Wrap around when moving past the first or last row
    -h, --help           Show this help message
    -V, --version        Show version

KEYBINDINGS:
    Enter, Ctrl-J, Ctrl-M   Accept the selected line
    Ctrl-C, Escape          Cancel
    Down, Ctrl-N            Next row
    Up, Ctrl-P              Previous row
    Backspace, Ctrl-H       Delete one character
    Ctrl-W                  Delete one word
    Ctrl-U                  Clear the query

EXIT STATUS:
    0    a line was chosen
    1    confirmed with nothing matching
    2    error
    130  cancelled

ENVIRONMENT VARIABLES:
    FPICK_SEARCH         Override --search
    FPICK_HEIGHT         Override --height (N or 'full')
    FPICK_IGNORE_CASE    Set to 1 to enable --ignore-case
    FPICK_WRAP           Set to 1 to enable --wrap
    FPICK_LOG_FILE       Write logs to this file
    FPICK_LOG            Log filter (default: info)";

/// How many rows the UI takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Height {
    /// A fixed number of rows, prompt included.
    Rows(u16),
    /// Every row of the terminal.
    Full,
}

impl Height {
    /// Rows to use on a terminal `terminal_rows` tall: at most the terminal
    /// height, never below [`MIN_HEIGHT`].
    #[must_use]
    pub fn resolve(self, terminal_rows: u16) -> u16 {
        let rows = match self {
            Self::Rows(rows) => rows,
            Self::Full => terminal_rows,
        };
        rows.min(terminal_rows).max(MIN_HEIGHT)
    }

    fn parse(value: &str) -> Option<Self> {
        if value == "full" {
            return Some(Self::Full);
        }
        match value.parse() {
            Ok(rows) if rows >= MIN_HEIGHT => Some(Self::Rows(rows)),
            _ => None,
        }
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Query typed before the first key press.
    pub search: String,
    /// UI height.
    pub height: Height,
    /// Fold case before scoring.
    pub ignore_case: bool,
    /// Wrap-around navigation.
    pub wrap: bool,
    /// Choice source; `None` reads standard input.
    pub input: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            search: String::new(),
            height: Height::Rows(DEFAULT_HEIGHT),
            ignore_case: false,
            wrap: false,
            input: None,
        }
    }
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the picker.
    Run(Opts),
    /// Print [`HELP_TEXT`].
    Help,
    /// Print the version.
    Version,
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A flag nobody knows.
    UnknownArgument(String),
    /// A flag that takes a value was last on the line.
    MissingValue(&'static str),
    /// `--height` was not a number >= 2 or `full`.
    InvalidHeight(String),
    /// More than one input file.
    UnexpectedArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::InvalidHeight(value) => write!(
                f,
                "invalid --height value: {value} (expected a number >= {MIN_HEIGHT} or 'full')"
            ),
            Self::UnexpectedArgument(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Command, CliError> {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse `args` (without the program name) against the process
    /// environment.
    pub fn parse_from<I, S>(args: I) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::parse_with_env(args, |key| env::var(key).ok())
    }

    /// Parse `args` with environment lookups going through `var`.
    pub fn parse_with_env<I, S, F>(args: I, var: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment defaults first; malformed values are ignored.
        if let Some(val) = var("FPICK_SEARCH") {
            opts.search = val;
        }
        if let Some(val) = var("FPICK_HEIGHT")
            && let Some(height) = Height::parse(&val)
        {
            opts.height = height;
        }
        if let Some(val) = var("FPICK_IGNORE_CASE") {
            opts.ignore_case = is_truthy(&val);
        }
        if let Some(val) = var("FPICK_WRAP") {
            opts.wrap = is_truthy(&val);
        }

        let mut args = args.into_iter().map(Into::into);
        let mut positional_only = false;
        while let Some(arg) = args.next() {
            if positional_only || arg == "-" || !arg.starts_with('-') {
                opts.set_input(arg)?;
                continue;
            }
            match arg.as_str() {
                "--" => positional_only = true,
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--ignore-case" | "-i" => opts.ignore_case = true,
                "--wrap" => opts.wrap = true,
                "--search" | "-s" => {
                    opts.search = args.next().ok_or(CliError::MissingValue("--search"))?;
                }
                "--height" => {
                    let val = args.next().ok_or(CliError::MissingValue("--height"))?;
                    opts.height = Height::parse(&val).ok_or(CliError::InvalidHeight(val))?;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--search=") {
                        opts.search = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = Height::parse(val)
                            .ok_or_else(|| CliError::InvalidHeight(val.to_string()))?;
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Search settings for a UI `height` rows tall.
    #[must_use]
    pub fn search_config(&self, height: u16) -> SearchConfig {
        SearchConfig::new(usize::from(height.saturating_sub(1)))
            .with_initial_query(self.search.clone())
            .with_ignore_case(self.ignore_case)
            .with_wrap_navigation(self.wrap)
    }

    fn set_input(&mut self, arg: String) -> Result<(), CliError> {
        if self.input.is_some() {
            return Err(CliError::UnexpectedArgument(arg));
        }
        self.input = (arg != "-").then(|| PathBuf::from(arg));
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes" | "on")
}
