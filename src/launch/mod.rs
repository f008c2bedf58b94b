//! Launch configurations: templates, building and the launch file
//!
//! A launch configuration is kept as a raw JSON object so that every field a
//! template defines survives untouched, in the template's order. Only the
//! fields we own (`name`, `cwd`, `environment`, `program`, `args`,
//! `preLaunchTask`) are overwritten.

pub mod builder;
pub mod store;
pub mod template;

pub use builder::build_launch_config;
pub use store::{LaunchConfigs, Upsert};
pub use template::load_template;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::Result;

/// One named entry of `configurations`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchConfig(Map<String, Value>);

impl LaunchConfig {
    /// Wrap a JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The `name` field, if it is a string
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field, keeping its position if it already exists
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Two-space indented JSON, as written to the launch file
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}
