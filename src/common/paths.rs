//! Configuration, template and launch file paths

use std::path::{Path, PathBuf};

/// Name used for the configuration directory
const APP_NAME: &str = "jtreg-launch";

/// Launch file written when the configuration does not name one
pub const DEFAULT_LAUNCH_FILE: &str = ".vscode/launch.json";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/jtreg-launch/`
/// - macOS: `~/Library/Application Support/jtreg-launch/`
/// - Windows: `%APPDATA%\jtreg-launch\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Template directory shipped alongside the executable
///
/// Falls back to a relative `templates` directory when the executable
/// location cannot be determined.
pub fn bundled_templates_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
        .unwrap_or_else(|| PathBuf::from("templates"))
}

/// Resolve the launch file against the current directory
pub fn launch_file(configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(configured))
            .unwrap_or_else(|_| configured.to_path_buf())
    }
}
