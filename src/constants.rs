// src/constants.rs

/// The name of the per-user configuration directory (inside the system config dir).
pub const APP_DIR_NAME: &str = "runmenu";

/// The name of the settings file (inside the configuration directory).
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// Prefix marking a command that runs as a plain executable, without shell or profile.
pub const DIRECT_SENTINEL: char = '!';

/// Prefix marking a shell-wrapped command whose echo line is suppressed.
pub const QUIET_SENTINEL: char = '_';

/// Shell used to wrap commands when the settings do not name one.
pub const DEFAULT_SHELL: &str = "bash";

/// Profile sourced before every wrapped command when the settings do not name one.
pub const DEFAULT_PROFILE: &str = "~/.bash_profile";
