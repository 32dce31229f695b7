// src/core/mod.rs

pub mod color;
pub mod config_loader;
pub mod keymap;
pub mod menu_builder;
pub mod paths;
pub mod selector;
pub mod session;
pub mod settings;
