// src/system/terminal.rs

use dialoguer::console::{Key, Term};
use std::io;

/// The handful of terminal operations the menu needs.
///
/// Implemented for [`Term`]; tests drive the menu through a scripted implementation.
pub trait MenuTerminal {
    /// Blocks until a single key is pressed. Keys are read in raw mode, so
    /// Ctrl-C arrives as [`Key::CtrlC`] instead of a signal.
    fn read_key(&mut self) -> io::Result<Key>;
    fn write_line(&mut self, line: &str) -> io::Result<()>;
    fn move_cursor_up(&mut self, lines: usize) -> io::Result<()>;
    fn clear_to_end_of_screen(&mut self) -> io::Result<()>;
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

impl MenuTerminal for Term {
    fn read_key(&mut self) -> io::Result<Key> {
        Term::read_key_raw(self)
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        Term::write_line(self, line)
    }

    fn move_cursor_up(&mut self, lines: usize) -> io::Result<()> {
        Term::move_cursor_up(self, lines)
    }

    fn clear_to_end_of_screen(&mut self) -> io::Result<()> {
        Term::clear_to_end_of_screen(self)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Term::hide_cursor(self)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Term::show_cursor(self)
    }

    fn flush(&mut self) -> io::Result<()> {
        Term::flush(self)
    }
}
