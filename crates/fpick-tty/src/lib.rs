#![forbid(unsafe_code)]

//! Terminal I/O for fpick.
//!
//! [`TerminalSession`] owns raw mode and restores the terminal exactly once,
//! however the program leaves. [`TerminalPort`] is the narrow surface the
//! event loop draws through; [`TtyPort`] implements it on the controlling
//! terminal so standard output stays free for the selection.

pub mod port;
pub mod session;

pub use port::{TerminalPort, TtyPort};
pub use session::TerminalSession;
