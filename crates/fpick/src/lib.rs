#![forbid(unsafe_code)]

//! fpick: an interactive fuzzy picker.
//!
//! Reads choices, lets the operator narrow them down on the terminal, and
//! hands back the chosen line. The binary in `main.rs` is a thin wrapper
//! over [`execute`].

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod source;

use fpick_core::SearchState;
use fpick_tty::{TerminalPort, TtyPort};

pub use app::{Outcome, run};
pub use cli::{Command, Height, Opts};
pub use error::Error;
pub use source::load_choices;

/// Load choices, run the picker on the controlling terminal, and restore
/// the terminal before returning.
pub fn execute(opts: &Opts) -> Result<Outcome, Error> {
    let choices = source::load_from(opts.input.as_deref()).map_err(|source| Error::Input {
        path: opts.input.clone(),
        source,
    })?;

    let mut port = TtyPort::open()?;
    let (_, terminal_rows) = port.size()?;
    let height = opts.height.resolve(terminal_rows);
    let state = SearchState::from_config(choices, opts.search_config(height));
    let outcome = run(&mut port, state);
    port.close()?;
    Ok(outcome?)
}
