//! Build command execution
//!
//! Runs the build invocation through the shell and captures its stdout.
//! `KEY=VALUE` words in front of the build tool are also remembered so the
//! generated launch configuration can reproduce them.

use std::collections::BTreeMap;
use std::process::Stdio;

use tokio::process::Command as TokioCommand;

use crate::common::{Error, Result};

/// Captured output of a build invocation
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    /// Standard output of the command
    pub stdout: String,
    /// Inline environment assignments found before the build tool
    pub env: BTreeMap<String, String>,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
}

/// Split `command` at the first `build_tool` token
///
/// Returns the inline `KEY=VALUE` assignments in front of it and the words
/// left for the shell line: every other word before the token, followed by
/// the invocation starting at the build tool. Fails if the command does not
/// contain `build_tool`.
pub fn split_command<'a>(
    command: &'a [String],
    build_tool: &str,
) -> Result<(BTreeMap<String, String>, Vec<&'a str>)> {
    let position = command
        .iter()
        .position(|word| word == build_tool)
        .ok_or_else(|| Error::BuildToolMissing(build_tool.to_string()))?;
    let (prefix, invocation) = command.split_at(position);

    let mut env = BTreeMap::new();
    let mut words = Vec::with_capacity(command.len());
    for word in prefix {
        match assignment(word) {
            Some((key, value)) => {
                env.insert(key.to_string(), value.to_string());
            }
            None => words.push(word.as_str()),
        }
    }
    words.extend(invocation.iter().map(String::as_str));

    Ok((env, words))
}

/// `NAME=value` where `NAME` is a valid shell variable name
fn assignment(word: &str) -> Option<(&str, &str)> {
    let (key, value) = word.split_once('=')?;
    let mut chars = key.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some((key, value))
}

/// Run `command` through `sh -c` and wait for it to finish
///
/// The inline assignments are applied to the child's environment rather
/// than left in the shell line: a quoted `'KEY=VALUE'` word is not an
/// assignment to `sh`. All other words run as given. A non-zero exit status
/// is logged, not treated as an error, since a failing test run still
/// prints its rerun block.
pub async fn run_command(command: &[String], build_tool: &str) -> Result<CommandResult> {
    let (env, words) = split_command(command, build_tool)?;

    let line = shlex::try_join(words).map_err(|e| Error::CommandQuoting(e.to_string()))?;

    tracing::info!(command = %line, "Running build command");

    let output = TokioCommand::new("sh")
        .arg("-c")
        .arg(&line)
        .envs(&env)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(Error::CommandSpawn)?;

    let exit_code = output.status.code();
    if !output.status.success() {
        tracing::warn!(status = ?exit_code, "Build command exited unsuccessfully");
    }
    tracing::debug!(
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "Build command finished"
    );

    Ok(CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        env,
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_inline_env_before_build_tool() {
        let command = words(&["JTREG_VERBOSE=all", "CONF=linux", "make", "test", "TEST=foo"]);
        let (env, shell_words) = split_command(&command, "make").unwrap();

        assert_eq!(env.len(), 2);
        assert_eq!(env["JTREG_VERBOSE"], "all");
        assert_eq!(env["CONF"], "linux");
        assert!(!env.contains_key("TEST"));
        assert_eq!(shell_words, vec!["make", "test", "TEST=foo"]);
    }

    #[test]
    fn test_inline_env_splits_on_first_equals() {
        let command = words(&["JTREG=VERBOSE=all;RETAIN=all", "make", "test"]);
        let (env, _) = split_command(&command, "make").unwrap();
        assert_eq!(env["JTREG"], "VERBOSE=all;RETAIN=all");
    }

    #[test]
    fn test_prefix_words_stay_in_shell_line() {
        let command = words(&["nice", "CONF=linux", "--opt=1", "make", "test"]);
        let (env, shell_words) = split_command(&command, "make").unwrap();

        assert_eq!(env.len(), 1);
        assert_eq!(env["CONF"], "linux");
        assert_eq!(shell_words, vec!["nice", "--opt=1", "make", "test"]);
    }

    #[test]
    fn test_missing_build_tool_is_rejected() {
        let command = words(&["gmake", "test", "TEST=foo"]);
        let err = split_command(&command, "make").unwrap_err();
        assert!(matches!(err, Error::BuildToolMissing(ref tool) if tool == "make"));
    }

    #[tokio::test]
    async fn test_missing_build_tool_fails_before_spawning() {
        let marker = tempfile::tempdir().unwrap();
        let touched = marker.path().join("spawned");
        let command = words(&["touch", touched.to_str().unwrap()]);

        assert!(run_command(&command, "make").await.is_err());
        assert!(!touched.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_captures_stdout() {
        let command = words(&["echo", "rerun:"]);
        let result = run_command(&command, "echo").await.unwrap();

        assert_eq!(result.stdout, "rerun:\n");
        assert_eq!(result.exit_code, Some(0));
        assert!(result.env.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_passes_inline_env() {
        let command = words(&["GREETING=hello world", "sh", "-c", "printf %s \"$GREETING\""]);
        let result = run_command(&command, "sh").await.unwrap();

        assert_eq!(result.env["GREETING"], "hello world");
        assert_eq!(result.stdout, "hello world");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_keeps_words_before_build_tool() {
        let command = words(&["printf", "%s|", "pre", "sh", "-c", "echo hi"]);
        let result = run_command(&command, "sh").await.unwrap();

        assert_eq!(result.stdout, "pre|sh|-c|echo hi|");
        assert!(result.env.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_ignores_exit_status() {
        let command = words(&["sh", "-c", "echo partial; exit 3"]);
        let result = run_command(&command, "sh").await.unwrap();

        assert_eq!(result.stdout, "partial\n");
        assert_eq!(result.exit_code, Some(3));
    }
}
