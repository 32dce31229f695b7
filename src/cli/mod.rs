use clap::Parser;
use std::path::PathBuf;

/// Builds the color-aware help text at runtime.
fn build_help_string() -> &'static str {
    // Replaces the semantic tags of the translated template (`<title>`, `<cmd>`, ...)
    // with ANSI styles, or with nothing when colors are off.
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// The usage line printed when no menu file is given or its extension is wrong.
pub fn usage(program: &str) -> String {
    format!(t!("cli.usage"), program = program)
}

/// runmenu: an interactive, nested terminal menu that launches shell commands.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The menu definition, JSON (`.json`) or YAML (`.yaml`).
    /// Optional for clap so the binary can print its own usage line.
    pub file: Option<PathBuf>,

    /// Settings file to use instead of `<config dir>/runmenu/settings.toml`.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Shell used to wrap commands.
    #[arg(long)]
    pub shell: Option<String>,

    /// Profile sourced before each wrapped command.
    #[arg(long, conflicts_with = "no_profile")]
    pub profile: Option<String>,

    /// Do not source any profile before wrapped commands.
    #[arg(long)]
    pub no_profile: bool,
}

impl Cli {
    /// Applies the command-line overrides to the shell settings.
    pub fn apply_overrides(&self, shell: &mut crate::models::ShellSettings) {
        if let Some(program) = &self.shell {
            shell.program = program.clone();
        }
        if let Some(profile) = &self.profile {
            shell.profile = Some(profile.clone());
        }
        if self.no_profile {
            shell.profile = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShellSettings;

    #[test]
    fn test_parse_file_and_overrides() {
        let cli = Cli::try_parse_from(["runmenu", "menu.yaml", "--shell", "zsh", "--no-profile"])
            .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("menu.yaml")));

        let mut shell = ShellSettings::default();
        cli.apply_overrides(&mut shell);
        assert_eq!(shell.program, "zsh");
        assert_eq!(shell.profile, None);
        assert!(shell.pipefail);
    }

    #[test]
    fn test_file_is_optional_for_the_parser() {
        let cli = Cli::try_parse_from(["runmenu"]).unwrap();
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_profile_and_no_profile_conflict() {
        let result = Cli::try_parse_from(["runmenu", "m.json", "--profile", "x", "--no-profile"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_usage_names_the_program() {
        let text = usage("runmenu");
        assert!(text.contains("runmenu"));
        assert!(text.contains(".json"));
        assert!(text.contains(".yaml"));
    }
}
