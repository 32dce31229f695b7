//! # Interactive Selector
//!
//! Draws one menu frame at a time and turns keypresses into navigation. The
//! navigation itself is the small state machine in [`SelectionState`]; the
//! [`Selector`] wraps it with drawing, in-place redraws and key reading.
//!
//! A call to [`Selector::display`] ends in one of two ways: a command entry was
//! chosen (the returned [`Selection`] names it together with the menu it was
//! chosen from), or the user quit.

use crate::{
    core::{
        color,
        keymap::{self, Action},
    },
    models::{MenuStyle, MenuTree, NodeId},
    system::terminal::MenuTerminal,
};
use colored::Colorize;
use dialoguer::console::measure_text_width;
use std::io;

/// Result of one selector run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The last menu shown. The next run starts from here.
    pub menu: NodeId,
    /// The chosen command entry, `None` when the user quit.
    pub choice: Option<NodeId>,
}

/// What a single action did to the selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved,
    Entered,
    Left,
    Chosen(NodeId),
    Exit,
    Ignored,
}

/// Current menu and cursor. The way back up is the tree's parent link, so no
/// separate stack is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    menu: NodeId,
    cursor: usize,
    back_exits_at_root: bool,
}

impl SelectionState {
    /// Starts on `menu` with the cursor on `focus` when it is one of its entries.
    /// A `menu` that is not a branch falls back to the root.
    pub fn new(tree: &MenuTree, menu: NodeId, focus: Option<NodeId>) -> Self {
        let menu = if tree.is_branch(menu) {
            menu
        } else {
            tree.root()
        };
        let cursor = focus
            .and_then(|entry| tree.children(menu).iter().position(|&child| child == entry))
            .unwrap_or(0);
        Self {
            menu,
            cursor,
            back_exits_at_root: false,
        }
    }

    /// Makes Back on the root menu quit instead of doing nothing.
    pub fn with_back_exits_at_root(mut self, enabled: bool) -> Self {
        self.back_exits_at_root = enabled;
        self
    }

    pub fn menu(&self) -> NodeId {
        self.menu
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The entry under the cursor, if the menu has any.
    pub fn highlighted(&self, tree: &MenuTree) -> Option<NodeId> {
        tree.children(self.menu).get(self.cursor).copied()
    }

    pub fn apply(&mut self, tree: &MenuTree, action: Action) -> Transition {
        let count = tree.children(self.menu).len();
        match action {
            Action::Up | Action::Down if count == 0 => Transition::Ignored,
            Action::Up => {
                self.cursor = (self.cursor + count - 1) % count;
                Transition::Moved
            }
            Action::Down => {
                self.cursor = (self.cursor + 1) % count;
                Transition::Moved
            }
            Action::Select => match self.highlighted(tree) {
                Some(entry) if tree.is_branch(entry) => {
                    self.menu = entry;
                    self.cursor = 0;
                    Transition::Entered
                }
                Some(entry) => Transition::Chosen(entry),
                None => Transition::Ignored,
            },
            Action::Back => match tree.parent(self.menu) {
                Some(parent) => {
                    self.cursor = tree.position_in_parent(self.menu).unwrap_or(0);
                    self.menu = parent;
                    Transition::Left
                }
                None if self.back_exits_at_root => Transition::Exit,
                None => Transition::Ignored,
            },
            Action::Quit => Transition::Exit,
        }
    }
}

/// Renders the frame for `state`: the path of menus leading to the current one,
/// then one row per entry.
pub fn compose_frame(tree: &MenuTree, style: &MenuStyle, state: &SelectionState) -> Vec<String> {
    let indent = |depth: usize| " ".repeat(depth * style.indent);
    let mut lines = Vec::new();

    for ancestor in tree.ancestors(state.menu) {
        lines.push(format!(
            "{}{}",
            indent(tree.depth(ancestor)),
            tree.label(ancestor).dimmed()
        ));
    }
    lines.push(format!(
        "{}{}",
        indent(tree.depth(state.menu)),
        tree.label(state.menu).bold()
    ));

    let entries = tree.children(state.menu);
    if entries.is_empty() {
        lines.push(format!(
            "{}{}",
            indent(tree.depth(state.menu) + 1),
            t!("menu.placeholder.empty").dimmed()
        ));
        return lines;
    }

    for (position, &entry) in entries.iter().enumerate() {
        let is_branch = tree.is_branch(entry);
        let (prompt, entry_color) = if is_branch {
            (&style.submenu_prompt, style.submenu_color)
        } else {
            (&style.item_prompt, style.item_color)
        };
        let marker = if is_branch {
            format!(" {}", style.submenu_marker)
        } else {
            String::new()
        };

        let row = if position == state.cursor {
            format!(
                "{}{}{}{}",
                color::paint(prompt, entry_color),
                style.suffix,
                color::paint(tree.label(entry), entry_color),
                color::paint(&marker, entry_color)
            )
        } else {
            format!(
                "{}{}{}{}",
                " ".repeat(measure_text_width(prompt)),
                style.suffix,
                tree.label(entry),
                marker.dimmed()
            )
        };
        lines.push(format!("{}{}", indent(tree.depth(entry)), row));
    }
    lines
}

/// Draws menus on a terminal and reads navigation keys from it.
#[derive(Debug)]
pub struct Selector<'a, T: MenuTerminal> {
    tree: &'a MenuTree,
    style: &'a MenuStyle,
    term: T,
    lines_on_screen: usize,
}

impl<'a, T: MenuTerminal> Selector<'a, T> {
    pub fn new(tree: &'a MenuTree, style: &'a MenuStyle, term: T) -> Self {
        Self {
            tree,
            style,
            term,
            lines_on_screen: 0,
        }
    }

    /// Height of the frame currently on screen.
    pub fn lines_on_screen(&self) -> usize {
        self.lines_on_screen
    }

    pub fn terminal(&mut self) -> &mut T {
        &mut self.term
    }

    pub fn into_terminal(self) -> T {
        self.term
    }

    /// Shows `menu` (cursor on `focus` if given) and navigates until an entry is
    /// chosen or the user quits. The frame is drawn below whatever is already on
    /// screen; later redraws replace it in place.
    pub fn display(&mut self, menu: NodeId, focus: Option<NodeId>) -> io::Result<Selection> {
        let mut state = SelectionState::new(self.tree, menu, focus)
            .with_back_exits_at_root(self.style.back_exits_at_root);
        self.lines_on_screen = 0;

        self.term.hide_cursor()?;
        let result = self.navigate(&mut state);
        let restored = self.term.show_cursor();
        let selection = result?;
        restored?;
        Ok(selection)
    }

    /// Removes the frame currently on screen.
    pub fn erase(&mut self) -> io::Result<()> {
        if self.lines_on_screen > 0 {
            self.term.move_cursor_up(self.lines_on_screen)?;
        }
        self.term.clear_to_end_of_screen()?;
        self.term.flush()?;
        self.lines_on_screen = 0;
        Ok(())
    }

    fn navigate(&mut self, state: &mut SelectionState) -> io::Result<Selection> {
        self.render(state)?;
        loop {
            let action = match self.term.read_key() {
                Ok(key) => {
                    log::trace!("Key pressed: {:?}", key);
                    match keymap::action_for(&key) {
                        Some(action) => action,
                        None => continue,
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => Action::Quit,
                Err(e) => return Err(e),
            };

            let transition = state.apply(self.tree, action);
            log::trace!(
                "{:?} -> {:?} (menu '{}', cursor {})",
                action,
                transition,
                self.tree.label(state.menu()),
                state.cursor()
            );
            match transition {
                Transition::Chosen(entry) => {
                    return Ok(Selection {
                        menu: state.menu(),
                        choice: Some(entry),
                    });
                }
                Transition::Exit => {
                    return Ok(Selection {
                        menu: state.menu(),
                        choice: None,
                    });
                }
                Transition::Ignored => {}
                Transition::Moved | Transition::Entered | Transition::Left => {
                    self.render(state)?;
                }
            }
        }
    }

    fn render(&mut self, state: &SelectionState) -> io::Result<()> {
        let lines = compose_frame(self.tree, self.style, state);
        if self.lines_on_screen > 0 {
            self.term.move_cursor_up(self.lines_on_screen)?;
            self.term.clear_to_end_of_screen()?;
        }
        for line in &lines {
            self.term.write_line(line)?;
        }
        self.term.flush()?;
        self.lines_on_screen = lines.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{menu_builder, settings},
        models::{MenuItem, StyleConfig},
        system::terminal::scripted::{ScreenEvent, ScriptedTerminal},
    };
    use dialoguer::console::Key;
    use proptest::prelude::*;

    fn item(name: &str, command: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            command: Some(command.to_string()),
            children: vec![],
        }
    }

    fn submenu(name: &str, children: Vec<MenuItem>) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            command: None,
            children,
        }
    }

    /// root: [A, B: [C, D: [E]], F]
    fn sample_tree() -> MenuTree {
        menu_builder::build(
            "root",
            0,
            &[
                item("A", "!true"),
                submenu(
                    "B",
                    vec![item("C", "_false"), submenu("D", vec![item("E", "ls")])],
                ),
                item("F", "echo f"),
            ],
        )
    }

    fn default_style() -> MenuStyle {
        settings::resolve_style(&StyleConfig::default()).unwrap()
    }

    fn entry(tree: &MenuTree, parent: NodeId, label: &str) -> NodeId {
        *tree
            .children(parent)
            .iter()
            .find(|&&child| tree.label(child) == label)
            .unwrap()
    }

    #[test]
    fn test_up_and_down_wrap_around() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree, tree.root(), None);
        assert_eq!(state.apply(&tree, Action::Up), Transition::Moved);
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.apply(&tree, Action::Down), Transition::Moved);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_select_leaf_chooses_it() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree, tree.root(), None);
        let a = entry(&tree, tree.root(), "A");
        assert_eq!(state.apply(&tree, Action::Select), Transition::Chosen(a));
        assert_eq!(state.menu(), tree.root());
    }

    #[test]
    fn test_enter_then_back_restores_cursor() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree, tree.root(), None);
        state.apply(&tree, Action::Down);
        assert_eq!(state.apply(&tree, Action::Select), Transition::Entered);
        let b = entry(&tree, tree.root(), "B");
        assert_eq!(state.menu(), b);
        assert_eq!(state.cursor(), 0);

        assert_eq!(state.apply(&tree, Action::Back), Transition::Left);
        assert_eq!(state.menu(), tree.root());
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_back_round_trip_two_levels_deep() {
        let tree = sample_tree();
        let b = entry(&tree, tree.root(), "B");
        let d = entry(&tree, b, "D");
        let mut state = SelectionState::new(&tree, b, Some(d));
        assert_eq!(state.cursor(), 1);

        state.apply(&tree, Action::Select);
        assert_eq!(state.menu(), d);
        state.apply(&tree, Action::Back);
        assert_eq!((state.menu(), state.cursor()), (b, 1));
        state.apply(&tree, Action::Back);
        assert_eq!((state.menu(), state.cursor()), (tree.root(), 1));
    }

    #[test]
    fn test_back_at_root_depends_on_style() {
        let tree = sample_tree();
        let mut state = SelectionState::new(&tree, tree.root(), None);
        assert_eq!(state.apply(&tree, Action::Back), Transition::Ignored);

        let mut state = state.with_back_exits_at_root(true);
        assert_eq!(state.apply(&tree, Action::Back), Transition::Exit);
    }

    #[test]
    fn test_empty_menu_is_navigable() {
        let tree = menu_builder::build("nothing here", 0, &[]);
        let mut state = SelectionState::new(&tree, tree.root(), None);
        assert_eq!(state.apply(&tree, Action::Down), Transition::Ignored);
        assert_eq!(state.apply(&tree, Action::Up), Transition::Ignored);
        assert_eq!(state.apply(&tree, Action::Select), Transition::Ignored);
        assert_eq!(state.apply(&tree, Action::Quit), Transition::Exit);

        let frame = compose_frame(&tree, &default_style(), &state);
        assert_eq!(frame.len(), 2);
        assert!(frame[1].contains(t!("menu.placeholder.empty")));
    }

    #[test]
    fn test_leaf_as_start_menu_falls_back_to_root() {
        let tree = sample_tree();
        let a = entry(&tree, tree.root(), "A");
        let state = SelectionState::new(&tree, a, None);
        assert_eq!(state.menu(), tree.root());
    }

    #[test]
    fn test_frame_shows_path_and_entries() {
        let tree = sample_tree();
        let b = entry(&tree, tree.root(), "B");
        let d = entry(&tree, b, "D");
        let state = SelectionState::new(&tree, b, Some(d));
        let frame = compose_frame(&tree, &default_style(), &state);

        assert_eq!(frame.len(), 4);
        assert!(frame[0].contains("root"));
        assert!(frame[1].starts_with("  ") && frame[1].contains('B'));
        assert!(frame[2].starts_with("    ") && frame[2].contains('C'));
        assert!(!frame[2].contains('❯'));
        assert!(frame[3].contains('❯') && frame[3].contains('D') && frame[3].contains('›'));
    }

    #[test]
    fn test_display_returns_choice_and_origin_menu() {
        let tree = sample_tree();
        let style = default_style();
        let term = ScriptedTerminal::new([Key::ArrowDown, Key::Enter, Key::Enter]);
        let mut selector = Selector::new(&tree, &style, term);

        let selection = selector.display(tree.root(), None).unwrap();
        let b = entry(&tree, tree.root(), "B");
        assert_eq!(selection.menu, b);
        assert_eq!(selection.choice, Some(entry(&tree, b, "C")));
        assert_eq!(selector.lines_on_screen(), 4);
    }

    #[test]
    fn test_display_quit_returns_no_choice() {
        let tree = sample_tree();
        let style = default_style();
        let term = ScriptedTerminal::new([Key::Char('x'), Key::Escape]);
        let mut selector = Selector::new(&tree, &style, term);

        let selection = selector.display(tree.root(), None).unwrap();
        assert_eq!(selection.choice, None);
        assert_eq!(selection.menu, tree.root());

        // The unbound key caused no redraw: only the first frame was drawn.
        let term = selector.into_terminal();
        assert_eq!(term.frames().len(), 1);
        assert!(!term.events.contains(&ScreenEvent::CursorUp(4)));
    }

    #[test]
    fn test_redraw_replaces_the_previous_frame() {
        let tree = sample_tree();
        let style = default_style();
        let term = ScriptedTerminal::new([Key::ArrowDown, Key::Char('q')]);
        let mut selector = Selector::new(&tree, &style, term);
        selector.display(tree.root(), None).unwrap();

        let term = selector.into_terminal();
        let up_position = term
            .events
            .iter()
            .position(|event| *event == ScreenEvent::CursorUp(4))
            .expect("the first frame should be erased before the second is drawn");
        assert_eq!(term.events[up_position + 1], ScreenEvent::ClearDown);
        assert_eq!(term.events.first(), Some(&ScreenEvent::HideCursor));
        assert_eq!(term.events.last(), Some(&ScreenEvent::ShowCursor));
    }

    #[test]
    fn test_display_starts_from_focus() {
        let tree = sample_tree();
        let style = default_style();
        let f = entry(&tree, tree.root(), "F");
        let term = ScriptedTerminal::new([Key::Enter]);
        let mut selector = Selector::new(&tree, &style, term);

        let selection = selector.display(tree.root(), Some(f)).unwrap();
        assert_eq!(selection.choice, Some(f));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let tree = sample_tree();
        let style = default_style();
        let term = ScriptedTerminal::new([Key::CtrlC]);
        let mut selector = Selector::new(&tree, &style, term);
        assert_eq!(selector.display(tree.root(), None).unwrap().choice, None);
    }

    #[test]
    fn test_running_out_of_input_is_an_error() {
        let tree = sample_tree();
        let style = default_style();
        let mut selector = Selector::new(&tree, &style, ScriptedTerminal::new([]));
        let err = selector.display(tree.root(), None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        // The cursor is shown again even when navigation fails.
        assert_eq!(
            selector.terminal().events.last(),
            Some(&ScreenEvent::ShowCursor)
        );
    }

    #[test]
    fn test_erase_moves_up_and_clears() {
        let tree = sample_tree();
        let style = default_style();
        let term = ScriptedTerminal::new([Key::Escape]);
        let mut selector = Selector::new(&tree, &style, term);
        selector.display(tree.root(), None).unwrap();
        selector.erase().unwrap();

        assert_eq!(selector.lines_on_screen(), 0);
        let events = &selector.terminal().events;
        let tail = &events[events.len() - 3..];
        assert_eq!(
            tail,
            &[
                ScreenEvent::CursorUp(4),
                ScreenEvent::ClearDown,
                ScreenEvent::Flush
            ]
        );
    }

    fn flat_tree(size: usize) -> MenuTree {
        let items: Vec<MenuItem> = (0..size)
            .map(|i| item(&format!("entry {}", i), "true"))
            .collect();
        menu_builder::build("flat", 0, &items)
    }

    proptest! {
        #[test]
        fn prop_cursor_wraps_modulo_entry_count(
            size in 1usize..12,
            start in 0usize..12,
            moves in prop::collection::vec(any::<bool>(), 0..64),
        ) {
            let tree = flat_tree(size);
            let initial = start % size;
            let focus = tree.children(tree.root()).get(initial).copied();
            let mut state = SelectionState::new(&tree, tree.root(), focus);
            prop_assert_eq!(state.cursor(), initial);

            let mut net: i64 = 0;
            for down in &moves {
                let action = if *down { Action::Down } else { Action::Up };
                prop_assert_eq!(state.apply(&tree, action), Transition::Moved);
                net += if *down { 1 } else { -1 };
                prop_assert!(state.cursor() < size);
            }

            let m = size as i64;
            let expected = ((initial as i64 + net) % m + m) % m;
            prop_assert_eq!(state.cursor() as i64, expected);
        }
    }
}
