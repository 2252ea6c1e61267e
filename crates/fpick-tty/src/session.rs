#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII ownership of raw mode for an inline picker. The UI is drawn on the
//! controlling terminal (`/dev/tty`), not on standard output, so that the
//! selected line can be piped while the operator still sees the prompt.
//!
//! # Lifecycle Guarantees
//!
//! 1. **Drop restores the terminal** - When the [`TerminalSession`] is
//!    dropped, the cursor is shown, attributes are reset, and raw mode is
//!    left, in that order.
//!
//! 2. **Exactly once** - A `restored` flag makes explicit [`restore`] and the
//!    later drop idempotent.
//!
//! 3. **Panic safety** - A process-wide panic hook runs a best-effort restore
//!    before the previous hook prints the message, so the message lands on a
//!    sane terminal even with `panic = "abort"`.
//!
//! 4. **Signals** - On unix, SIGINT and SIGTERM delivered from outside (raw
//!    mode turns Ctrl-C into a key press) restore the terminal and exit with
//!    `128 + signal`.
//!
//! [`restore`]: TerminalSession::restore
//!
//! # Usage
//!
//! ```no_run
//! use fpick_tty::TerminalSession;
//!
//! let session = TerminalSession::new()?;
//! // ... draw and read events ...
//! drop(session); // terminal restored
//! # Ok::<(), std::io::Error>(())
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::OnceLock;

use fpick_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use fpick_render::ansi;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Path of the controlling terminal on unix.
const TTY_PATH: &str = "/dev/tty";

/// Open the device the UI is drawn on.
///
/// The controlling terminal when there is one, standard error otherwise.
pub fn open_ui_output() -> Box<dyn Write + Send> {
    match OpenOptions::new().write(true).open(TTY_PATH) {
        Ok(tty) => Box::new(tty),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "no controlling terminal, drawing on stderr");
            Box::new(io::stderr())
        }
    }
}

/// A raw-mode session that restores the terminal on drop.
///
/// # Contract
///
/// - **Exclusive ownership**: Only one `TerminalSession` should exist at a
///   time.
/// - **Raw mode entry**: Creating a session enters raw mode, which disables
///   line buffering, echo, and signal keys.
#[derive(Debug)]
pub struct TerminalSession {
    restored: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or the signal handler
    /// cannot be registered.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode enabled");

        Ok(Self {
            restored: false,
            #[cfg(unix)]
            signal_guard: Some(SignalGuard::new()?),
        })
    }

    /// Get the current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Read the next event, blocking until one arrives.
    ///
    /// Returns `Ok(None)` for events fpick does not handle (mouse, focus,
    /// unsupported keys).
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        let event = crossterm::event::read()?;
        Ok(map_crossterm_event(event))
    }

    /// Restore the terminal now. Later calls and the drop do nothing.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        #[cfg(unix)]
        let _ = self.signal_guard.take();

        best_effort_cleanup();
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode disabled");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.restore();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut out = open_ui_output();
    let _ = ansi::sgr_reset(&mut out);
    let _ = ansi::cursor_show(&mut out);
    let _ = out.flush();
    let _ = crossterm::terminal::disable_raw_mode();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                #[cfg(feature = "tracing")]
                tracing::warn!(signal, "termination signal received, cleaning up");
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

// ---------------------------------------------------------------------------
// Crossterm translation
// ---------------------------------------------------------------------------

fn map_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
    match event {
        crossterm::event::Event::Key(key) => map_key_event(key).map(Event::Key),
        crossterm::event::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    let modifiers = map_modifiers(event.modifiers);
    let kind = map_key_kind(event.kind);
    Some(KeyEvent {
        code,
        modifiers,
        kind,
    })
}

fn map_key_kind(kind: crossterm::event::KeyEventKind) -> KeyEventKind {
    match kind {
        crossterm::event::KeyEventKind::Press => KeyEventKind::Press,
        crossterm::event::KeyEventKind::Repeat => KeyEventKind::Repeat,
        crossterm::event::KeyEventKind::Release => KeyEventKind::Release,
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> Option<KeyCode> {
    match code {
        crossterm::event::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        crossterm::event::KeyCode::Enter => Some(KeyCode::Enter),
        crossterm::event::KeyCode::Esc => Some(KeyCode::Escape),
        crossterm::event::KeyCode::Backspace => Some(KeyCode::Backspace),
        crossterm::event::KeyCode::Up => Some(KeyCode::Up),
        crossterm::event::KeyCode::Down => Some(KeyCode::Down),
        _ => None,
    }
}

/// Only Alt and Ctrl change what a key does; Shift is already folded into
/// the character.
fn map_modifiers(modifiers: crossterm::event::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event as ct;

    #[test]
    fn maps_plain_char() {
        let event = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Char('a'),
            ct::KeyModifiers::NONE,
        ));
        assert_eq!(
            map_crossterm_event(event),
            Some(Event::Key(KeyEvent::new(KeyCode::Char('a'))))
        );
    }

    #[test]
    fn maps_ctrl_char() {
        let event = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Char('w'),
            ct::KeyModifiers::CONTROL,
        ));
        assert_eq!(
            map_crossterm_event(event),
            Some(Event::Key(KeyEvent::ctrl_char('w')))
        );
    }

    #[test]
    fn maps_escape_and_release() {
        let key = ct::KeyEvent::new_with_kind(
            ct::KeyCode::Esc,
            ct::KeyModifiers::NONE,
            ct::KeyEventKind::Release,
        );
        assert_eq!(
            map_key_event(key),
            Some(KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release))
        );
    }

    #[test]
    fn maps_resize() {
        assert_eq!(
            map_crossterm_event(ct::Event::Resize(100, 30)),
            Some(Event::Resize {
                width: 100,
                height: 30
            })
        );
    }

    #[test]
    fn drops_unhandled_events() {
        assert_eq!(map_crossterm_event(ct::Event::FocusGained), None);
        for code in [ct::KeyCode::CapsLock, ct::KeyCode::Left, ct::KeyCode::Tab] {
            let key = ct::KeyEvent::new(code, ct::KeyModifiers::NONE);
            assert_eq!(map_key_event(key), None);
        }
    }

    #[test]
    fn keeps_only_alt_and_ctrl() {
        let shifted = ct::KeyEvent::new(ct::KeyCode::Char('A'), ct::KeyModifiers::SHIFT);
        assert_eq!(map_key_event(shifted), Some(KeyEvent::new(KeyCode::Char('A'))));

        let mods = ct::KeyModifiers::META | ct::KeyModifiers::ALT | ct::KeyModifiers::CONTROL;
        assert_eq!(map_modifiers(mods), Modifiers::ALT | Modifiers::CTRL);
    }

    // Tests that enter raw mode would fight the test runner for the
    // terminal; the event loop is exercised through a scripted port instead.
}
