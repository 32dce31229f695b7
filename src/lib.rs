//! # runmenu
//!
//! An interactive terminal launcher: a JSON or YAML file describes a tree of
//! named entries, each bound either to a shell command or to a submenu. The
//! menu is navigated with single keypresses, the chosen command runs attached
//! to the terminal, and the menu comes back where the user left it.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
