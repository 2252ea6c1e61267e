#![forbid(unsafe_code)]

//! Core: choices, fuzzy scoring, the immutable search state, and input events.
//!
//! Nothing in this crate touches a terminal. Every type is a value and every
//! transition returns a new value, which is what lets the binary test its
//! event loop against a scripted port.

pub mod choice;
pub mod event;
pub mod keymap;
pub mod logging;
pub mod score;
pub mod search;

pub use choice::Choice;
pub use keymap::Action;
pub use score::{Match, score};
pub use search::{SearchConfig, SearchState, Selection, View};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
