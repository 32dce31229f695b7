// src/core/session.rs

use crate::{
    core::selector::{Selection, Selector},
    models::{MenuStyle, MenuTree, NodeId, ShellSettings},
    system::{
        executor::{self, Outcome},
        terminal::MenuTerminal,
    },
};
use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

/// One command run during a session.
#[derive(Debug)]
pub struct RunRecord {
    /// The menu the entry was chosen from.
    pub menu: NodeId,
    pub entry: NodeId,
    pub outcome: Outcome,
}

/// What happened during a session. Kept in memory only.
#[derive(Debug)]
pub struct SessionReport {
    pub runs: Vec<RunRecord>,
    /// The menu shown when the user quit.
    pub last_menu: NodeId,
}

impl SessionReport {
    pub fn failures(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| !run.outcome.is_success())
            .count()
    }
}

/// The menu-run-menu loop.
///
/// Commands run on a single-threaded tokio runtime owned by the session; the
/// menu itself is drawn and read on the calling thread.
#[derive(Debug)]
pub struct Session<'a, T: MenuTerminal> {
    tree: &'a MenuTree,
    shell: &'a ShellSettings,
    selector: Selector<'a, T>,
    runtime: Runtime,
}

impl<'a, T: MenuTerminal> Session<'a, T> {
    pub fn new(
        tree: &'a MenuTree,
        style: &'a MenuStyle,
        shell: &'a ShellSettings,
        term: T,
    ) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start the command runtime")?;
        Ok(Self {
            tree,
            shell,
            selector: Selector::new(tree, style, term),
            runtime,
        })
    }

    /// Shows the root menu, runs every chosen entry and shows the menu again
    /// from where the entry was chosen, until the user quits. The last frame is
    /// erased on the way out.
    pub fn run(&mut self) -> Result<SessionReport> {
        let mut runs = Vec::new();
        let mut selection = self
            .selector
            .display(self.tree.root(), None)
            .context("Failed to display the menu")?;

        while let Some(entry) = selection.choice {
            runs.push(self.run_entry(selection, entry)?);
            selection = self
                .selector
                .display(selection.menu, Some(entry))
                .context("Failed to display the menu")?;
        }

        self.selector
            .erase()
            .context("Failed to clear the menu from the terminal")?;
        log::debug!(
            "Session ended after {} run(s) in menu '{}'.",
            runs.len(),
            self.tree.label(selection.menu)
        );

        Ok(SessionReport {
            runs,
            last_menu: selection.menu,
        })
    }

    pub fn into_terminal(self) -> T {
        self.selector.into_terminal()
    }

    fn run_entry(&mut self, selection: Selection, entry: NodeId) -> Result<RunRecord> {
        let command = self.tree.command(entry).unwrap_or_default();
        log::debug!(
            "Running '{}' from menu '{}': {}",
            self.tree.label(entry),
            self.tree.label(selection.menu),
            command
        );

        let outcome = self.runtime.block_on(executor::execute(
            command,
            self.shell,
            self.selector.terminal(),
        ));

        // Blank line between the command's output and the next menu.
        self.selector
            .terminal()
            .write_line("")
            .context("Failed to write to the terminal")?;

        Ok(RunRecord {
            menu: selection.menu,
            entry,
            outcome,
        })
    }
}
