#![forbid(unsafe_code)]

//! Render: project a [`SearchState`](fpick_core::SearchState) into styled
//! lines, and write styled lines to a terminal as ANSI bytes.

pub mod ansi;
pub mod presenter;
pub mod renderer;

pub use presenter::Presenter;
pub use renderer::{RenderedFrame, render};
