//! Terminal setup and teardown.
//!
//! Enter/leave TUI mode and a panic hook that restores the terminal before
//! the panic message prints, so a crash never leaves the shell in raw mode.

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter TUI mode: raw mode plus the alternate screen.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(writer, EnterAlternateScreen)
}

/// Leave TUI mode and restore the terminal to a normal state.
///
/// Safe to call multiple times; all errors are ignored so cleanup always
/// runs to the end.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen);
    let _ = execute!(writer, Show);
}

/// Install a panic hook that restores the terminal before delegating to the
/// previous hook.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        leave_tui_mode(&mut io::stdout());
        previous(info);
    }));
}
