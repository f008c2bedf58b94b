//! Extraction of the test process invocation from jtreg output

mod parser;

pub use parser::{RerunParser, State};

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::common::Result;
use crate::runner::CommandResult;

/// The process a test run executed, as recovered from its rerun block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInvocation {
    /// Working directory, known to exist
    pub cwd: PathBuf,
    /// Environment, ordered by name
    pub env: BTreeMap<String, String>,
    /// Executable, known to exist
    pub program: PathBuf,
    /// Arguments after the executable
    pub args: Vec<String>,
}

/// Parse the build output and merge in the command's inline environment
///
/// Inline `KEY=VALUE` words from the command line override values of the
/// same name found in the rerun block.
pub fn parse(result: &CommandResult, executable: &str) -> Result<ParsedInvocation> {
    let mut invocation = RerunParser::new(executable).parse(&result.stdout)?;
    invocation
        .env
        .extend(result.env.iter().map(|(k, v)| (k.clone(), v.clone())));

    tracing::debug!(
        cwd = %invocation.cwd.display(),
        program = %invocation.program.display(),
        env = invocation.env.len(),
        args = invocation.args.len(),
        "Parsed rerun block"
    );
    Ok(invocation)
}
