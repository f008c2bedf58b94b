//! jtreg-launch - debug launch configurations for JTREG test runs
//!
//! Runs a build command, recovers the test JVM invocation from the
//! "rerun" block jtreg prints, and merges it into `.vscode/launch.json`
//! using a JSON template.

pub mod cli;
pub mod commands;
pub mod common;
pub mod launch;
pub mod rerun;
pub mod runner;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use launch::{LaunchConfig, LaunchConfigs, Upsert};
pub use rerun::ParsedInvocation;
