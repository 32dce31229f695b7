// src/bin/runmenu.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::console::Term;
use runmenu::{
    cli::{self, Cli},
    core::{
        config_loader::{self, ConfigError},
        menu_builder,
        session::Session,
        settings,
    },
    t,
};
use std::path::{Path, PathBuf};

/// The main entry point of the `runmenu` application.
/// It sets up logging, parses arguments, runs the menu session,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let Some(file) = cli.file.clone() else {
        eprint!("{}", cli::usage(&program_name()));
        std::process::exit(1);
    };

    if let Err(e) = run_cli(&cli, &file) {
        // --- Centralized Error Handling ---
        if let Some(ConfigError::UnsupportedExtension(ext)) = e.downcast_ref::<ConfigError>() {
            eprintln!("{}\n", format!(t!("cli.error.wrong_extension"), ext = ext));
            eprint!("{}", cli::usage(&program_name()));
            std::process::exit(1);
        }

        eprintln!("\n{}: {:#}", t!("cli.error.label").red().bold(), e);
        std::process::exit(1);
    }
}

/// Loads the menu and the settings, then hands the terminal over to the session.
/// A failing command never ends up here; only startup and terminal errors do.
fn run_cli(cli: &Cli, file: &Path) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let root = config_loader::load_menu_file(file)?;
    let tree = menu_builder::build_from_root(&root);

    let mut settings = settings::load_settings(cli.settings.as_deref())?;
    cli.apply_overrides(&mut settings.shell);
    let style = settings::resolve_style(&settings.style)?;
    log::debug!("Shell settings: {:?}", settings.shell);

    let mut session = Session::new(&tree, &style, &settings.shell, Term::stdout())?;
    let report = session.run()?;
    log::debug!(
        "{} command(s) run, {} failed.",
        report.runs.len(),
        report.failures()
    );
    Ok(())
}

fn program_name() -> String {
    std::env::args()
        .next()
        .map(PathBuf::from)
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "runmenu".to_string())
}
