//! Line-oriented state machine for the jtreg "rerun" block
//!
//! The block jtreg prints in verbose mode looks like:
//!
//! ```text
//! rerun:
//! cd /path/to/scratch && \
//! HOME=/home/user \
//! PATH=/bin:/usr/bin \
//!     /path/to/jdk/bin/java \
//!         -Dtest.vm.opts=-Xmx512m \
//!         -classpath /a:/b \
//!         com.sun.javatest.regtest.agent.MainWrapper /path/to/Test.d/main.0.jta
//!
//! ```
//!
//! Environment lines never start with a space, the executable line and all
//! argument lines do. Every line but the last ends with ` \`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::common::{Error, Result};

use super::ParsedInvocation;

/// Literals that introduce the block, LF or CRLF; the last occurrence wins
const MARKERS: [&str; 2] = ["rerun:\ncd", "rerun:\r\ncd"];

const CWD_SUFFIX: &str = " && \\";
const CONTINUATION: &str = " \\";

static ENV_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_]+=.+$").expect("valid env line regex"));

/// Parser states, in the order a well-formed block visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Looking for the rerun marker
    SeekMarker,
    /// Expecting ` /dir && \`
    ReadCwd,
    /// Reading `KEY=VALUE \` lines
    ReadEnv,
    /// Expecting the indented executable line
    ReadProgram,
    /// Reading continued argument lines up to the final one
    ReadArgs,
    /// Final argument line consumed
    Done,
}

/// Extracts one process invocation from build output
#[derive(Debug)]
pub struct RerunParser<'a> {
    executable: &'a str,
    state: State,
    cwd: Option<PathBuf>,
    env: BTreeMap<String, String>,
    program: Option<PathBuf>,
    args: Vec<String>,
}

impl<'a> RerunParser<'a> {
    /// Create a parser expecting an executable whose path ends with `executable`
    pub fn new(executable: &'a str) -> Self {
        Self {
            executable,
            state: State::SeekMarker,
            cwd: None,
            env: BTreeMap::new(),
            program: None,
            args: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Parse the last rerun block in `output`
    pub fn parse(mut self, output: &str) -> Result<ParsedInvocation> {
        let block = locate_block(output)?;
        self.transition(State::ReadCwd);

        let lines: Vec<&str> = block
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        let last = lines.len().saturating_sub(1);
        for (index, line) in lines.iter().enumerate() {
            self.feed(line, index == last)?;
        }

        self.finish()
    }

    fn transition(&mut self, next: State) {
        tracing::trace!(from = ?self.state, to = ?next, "rerun parser transition");
        self.state = next;
    }

    /// Consume one line of the block
    fn feed(&mut self, line: &str, is_last: bool) -> Result<()> {
        match self.state {
            State::SeekMarker => Err(Error::UnexpectedLine(format!(
                "line outside of a rerun block: {line}"
            ))),
            State::ReadCwd => {
                // The marker is normally followed by " /dir", tolerate a line break
                if line.is_empty() {
                    return Ok(());
                }
                self.cwd = Some(parse_cwd(line)?);
                self.transition(State::ReadEnv);
                Ok(())
            }
            State::ReadEnv => {
                if line.starts_with(' ') {
                    self.transition(State::ReadProgram);
                    return self.feed(line, is_last);
                }
                let (key, value) = parse_env_line(line)?;
                self.env.insert(key, value);
                Ok(())
            }
            State::ReadProgram => {
                if is_last {
                    return Err(Error::UnexpectedLine(format!(
                        "rerun block ends at the {} line: {line}",
                        self.executable
                    )));
                }
                self.program = Some(parse_program(line, self.executable)?);
                self.transition(State::ReadArgs);
                Ok(())
            }
            State::ReadArgs => {
                let trimmed = line.trim();
                if is_last {
                    self.args.extend(split_words(trimmed, self.executable)?);
                    self.transition(State::Done);
                    return Ok(());
                }
                let arg = trimmed
                    .strip_suffix(CONTINUATION)
                    .ok_or_else(|| Error::invalid_argument(self.executable, trimmed))?;
                self.args.extend(split_words(arg, self.executable)?);
                Ok(())
            }
            State::Done => Err(Error::UnexpectedLine(format!(
                "line after the end of the command: {line}"
            ))),
        }
    }

    fn finish(self) -> Result<ParsedInvocation> {
        match (self.state, self.cwd, self.program) {
            (State::Done, Some(cwd), Some(program)) => Ok(ParsedInvocation {
                cwd,
                env: self.env,
                program,
                args: self.args,
            }),
            (State::ReadCwd, ..) => Err(Error::UnexpectedLine(
                "rerun block has no working directory line".to_string(),
            )),
            (State::ReadEnv, ..) => Err(Error::UnexpectedLine(format!(
                "rerun block has no {} line",
                self.executable
            ))),
            (state, ..) => Err(Error::UnexpectedLine(format!(
                "rerun block ended while in state {state:?}"
            ))),
        }
    }
}

/// Text between the last marker and the first blank line after it
fn locate_block(output: &str) -> Result<&str> {
    let start = MARKERS
        .iter()
        .filter_map(|marker| output.rfind(marker).map(|at| at + marker.len()))
        .max()
        .ok_or(Error::MarkerNotFound)?;
    let rest = &output[start..];
    let end = ["\n\n", "\n\r\n"]
        .iter()
        .filter_map(|terminator| rest.find(terminator))
        .min()
        .ok_or(Error::UnterminatedBlock)?;
    Ok(&rest[..end])
}

/// ` /some/dir && \` -> `/some/dir`, which must exist
fn parse_cwd(line: &str) -> Result<PathBuf> {
    let cwd = line
        .strip_prefix(' ')
        .filter(|rest| rest.starts_with('/'))
        .and_then(|rest| rest.strip_suffix(CWD_SUFFIX))
        .ok_or_else(|| Error::UnexpectedLine(line.to_string()))?;
    require_exists("cwd", Path::new(cwd))
}

/// `KEY=VALUE \` -> (`KEY`, `VALUE`)
fn parse_env_line(line: &str) -> Result<(String, String)> {
    let assignment = line
        .strip_suffix(CONTINUATION)
        .filter(|assignment| ENV_LINE.is_match(assignment))
        .ok_or_else(|| Error::InvalidEnvLine(line.to_string()))?;
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| Error::InvalidEnvLine(line.to_string()))?;
    Ok((key.to_string(), value.to_string()))
}

/// `    /jdk/bin/java \` -> `/jdk/bin/java`, which must exist
fn parse_program(line: &str, executable: &str) -> Result<PathBuf> {
    let trimmed = line.trim();
    let program = trimmed
        .strip_suffix(CONTINUATION)
        .map(Path::new)
        .filter(|program| program.ends_with(executable))
        .ok_or_else(|| Error::invalid_executable(executable, trimmed))?;
    require_exists(executable, program)
}

fn split_words(text: &str, executable: &str) -> Result<Vec<String>> {
    shlex::split(text).ok_or_else(|| Error::invalid_argument(executable, text))
}

fn require_exists(what: &str, path: &Path) -> Result<PathBuf> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(Error::path_not_found(what, path))
    }
}
