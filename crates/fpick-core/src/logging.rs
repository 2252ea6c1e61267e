#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature `debug!` and `trace!` are re-exported from
//! `tracing`. Without it the same names expand to nothing, so call sites
//! never need their own `cfg`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
