// src/core/keymap.rs

use dialoguer::console::Key;

/// What a keypress means to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Select,
    Back,
    Quit,
}

/// Maps a key to its menu action. Keys without a binding return `None` and are ignored.
pub fn action_for(key: &Key) -> Option<Action> {
    match key {
        Key::ArrowUp | Key::BackTab | Key::Char('k') => Some(Action::Up),
        Key::ArrowDown | Key::Tab | Key::Char('j') => Some(Action::Down),
        Key::Enter | Key::ArrowRight | Key::Char('l') | Key::Char(' ') => Some(Action::Select),
        Key::ArrowLeft | Key::Backspace | Key::Char('h') => Some(Action::Back),
        Key::Escape | Key::CtrlC | Key::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
