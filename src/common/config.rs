//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{self, config_path};
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Rerun block expectations
    #[serde(default)]
    pub rerun: RerunConfig,

    /// Launch file settings
    #[serde(default)]
    pub launch: LaunchSettings,
}

/// Default settings
#[derive(Debug, Deserialize)]
pub struct Defaults {
    /// Template used when `--template` is not given
    #[serde(default = "default_template")]
    pub template: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: default_template(),
        }
    }
}

fn default_template() -> String {
    "gdb".to_string()
}

/// What the build command and its rerun block must look like
#[derive(Debug, Deserialize)]
pub struct RerunConfig {
    /// Token that must appear in the command; env assignments precede it
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// File name the executable path in the rerun block must end with
    #[serde(default = "default_executable")]
    pub executable: String,
}

impl Default for RerunConfig {
    fn default() -> Self {
        Self {
            build_tool: default_build_tool(),
            executable: default_executable(),
        }
    }
}

fn default_build_tool() -> String {
    "make".to_string()
}
fn default_executable() -> String {
    "java".to_string()
}

/// Launch file settings
#[derive(Debug, Deserialize)]
pub struct LaunchSettings {
    /// Launch file, relative to the current directory unless absolute
    #[serde(default = "default_launch_file")]
    pub file: PathBuf,

    /// Flags placed before the parsed arguments
    #[serde(default = "default_diagnostic_args")]
    pub diagnostic_args: Vec<String>,

    /// Directory holding named templates
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            file: default_launch_file(),
            diagnostic_args: default_diagnostic_args(),
            templates_dir: None,
        }
    }
}

fn default_launch_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_LAUNCH_FILE)
}

fn default_diagnostic_args() -> Vec<String> {
    vec![
        "-XX:+UnlockDiagnosticVMOptions".to_string(),
        "-XX:+WhiteBoxAPI".to_string(),
    ]
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, defaulting when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Directory bare template names are resolved in
    pub fn templates_dir(&self) -> PathBuf {
        self.launch
            .templates_dir
            .clone()
            .unwrap_or_else(paths::bundled_templates_dir)
    }
}
