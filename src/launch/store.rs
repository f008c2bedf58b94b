//! The launch file (`.vscode/launch.json`)
//!
//! Configurations are an ordered list keyed by `name`. Writing is a plain
//! overwrite: no locking, the last writer wins.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{Error, Result};

use super::LaunchConfig;

/// Schema version written into new launch files
pub const LAUNCH_VERSION: &str = "0.2.0";

/// Contents of a launch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfigs {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub configurations: Vec<LaunchConfig>,

    /// Other top-level keys (e.g. `compounds`), preserved as-is
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn default_version() -> String {
    LAUNCH_VERSION.to_string()
}

/// What [`LaunchConfigs::upsert`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Replaced,
}

impl Default for LaunchConfigs {
    fn default() -> Self {
        Self {
            version: default_version(),
            configurations: Vec::new(),
            other: Map::new(),
        }
    }
}

impl LaunchConfigs {
    /// Read an existing launch file
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::LaunchFile {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Read the launch file, or start an empty one if it does not exist
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::read(path)
        } else {
            tracing::debug!(path = %path.display(), "No launch file yet, starting empty");
            Ok(Self::default())
        }
    }

    /// Position of the configuration called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.configurations
            .iter()
            .position(|config| config.name() == Some(name))
    }

    /// Replace the configuration with the same name in place, or append
    pub fn upsert(&mut self, config: LaunchConfig) -> Upsert {
        let existing = config.name().and_then(|name| self.position(name));
        match existing {
            Some(index) => {
                self.configurations[index] = config;
                Upsert::Replaced
            }
            None => {
                self.configurations.push(config);
                Upsert::Added
            }
        }
    }

    /// Overwrite `path`, creating its directory if needed
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }
}
