//! # System Interaction Layer
//!
//! The boundary between the menu logic and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: Turns a menu entry's command into a process. It reads the
//!   `!`/`_` prefixes, wraps commands in the configured shell (profile sourcing,
//!   `pipefail`), runs them attached to the terminal and keeps interrupts from
//!   reaching the launcher while they run.
//! - **`terminal`**: The small set of terminal operations the menu uses (read a
//!   key, write a line, move the cursor, clear), implemented for `console::Term`.

pub mod executor;
pub mod terminal;
