use super::GitQuery;
use crate::error::{RepoStatError, Result};
use log::{debug, trace};
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Answers a [`GitQuery`] against a working directory with the command's
/// captured standard output. Callers trim as they need.
pub trait CommandRunner: Send + Sync {
    fn run(&self, workdir: &Path, query: GitQuery) -> Result<String>;
}

/// Runs queries through the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    timeout: Option<Duration>,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
            timeout: None,
        }
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill any command still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for GitCli {
    fn run(&self, workdir: &Path, query: GitQuery) -> Result<String> {
        debug!("running git {query} in {}", workdir.display());
        let started = Instant::now();

        let child = Command::new(&self.program)
            .args(query.args())
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let output = match self.timeout {
            Some(limit) => wait_with_deadline(child, query, limit)?,
            None => child.wait_with_output()?,
        };

        trace!(
            "git {query} exited with {} after {:?} ({} bytes)",
            output.status,
            started.elapsed(),
            output.stdout.len()
        );

        if !output.status.success() && !query.tolerates_failure() {
            return Err(RepoStatError::CommandFailed {
                query,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn wait_with_deadline(mut child: Child, query: GitQuery, limit: Duration) -> Result<Output> {
    // Pipes are drained on their own threads so a chatty command cannot block on a full buffer
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);
    let started = Instant::now();

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= limit {
            let _ = child.kill();
            let _ = child.wait();
            // Whole milliseconds; finer precision is just scheduler noise
            let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
            return Err(RepoStatError::Timeout { query, elapsed });
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

/// Test double that answers from a fixed table and records every query it
/// receives, in order. Unknown queries answer with empty text.
#[derive(Debug, Default)]
pub struct CannedRunner {
    answers: HashMap<GitQuery, String>,
    calls: Mutex<Vec<GitQuery>>,
}

impl CannedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: GitQuery, output: impl Into<String>) -> Self {
        self.answers.insert(query, output.into());
        self
    }

    pub fn calls(&self) -> Vec<GitQuery> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CommandRunner for CannedRunner {
    fn run(&self, _workdir: &Path, query: GitQuery) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(query);
        Ok(self.answers.get(&query).cloned().unwrap_or_default())
    }
}
