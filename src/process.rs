//! External command execution.
//!
//! Every tool the pipeline talks to (git, brew, the notifier) goes through
//! [`Invocation`], which captures output and bounds the wait with a timeout.

use crate::constants::PROCESS_POLL_MS;
use anyhow::Context;
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Callback used to echo command lines before they run.
pub type CommandLogger = fn(&str);

pub fn verbose_logger(command_line: &str) {
    use colored::Colorize;
    eprintln!("  {} {}", "$".dimmed(), command_line.dimmed());
}

pub fn no_op_logger(_command_line: &str) {}

/// A program with its argument vector and environment overrides.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
}

/// Captured result of a finished child process.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Invocation {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Space-joined command line, for logs and error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command to completion, whatever its exit status.
    ///
    /// Fails if the program cannot be spawned or does not exit within `timeout`;
    /// a timed-out child is killed.
    pub fn output(&self, timeout: Duration, logger: CommandLogger) -> anyhow::Result<CommandOutput> {
        let command_line = self.command_line();
        logger(&command_line);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn command: {}", command_line))?;

        // `None` when the timeout is too large to represent: wait forever.
        let deadline = Instant::now().checked_add(timeout);
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = wait_until(&mut child, deadline, timeout)
            .with_context(|| format!("Command did not finish: {}", command_line))?;

        Ok(CommandOutput {
            status,
            stdout: collect(stdout, deadline)
                .with_context(|| format!("Failed to read stdout of: {}", command_line))?,
            stderr: collect(stderr, deadline)
                .with_context(|| format!("Failed to read stderr of: {}", command_line))?,
        })
    }

    /// Runs the command and returns its stdout, failing on a non-zero exit.
    pub fn run(&self, timeout: Duration, logger: CommandLogger) -> anyhow::Result<String> {
        let output = self.output(timeout, logger)?;
        if output.status.success() {
            Ok(output.stdout)
        } else {
            anyhow::bail!(
                "{} failed ({}): {}",
                self.command_line(),
                output.status,
                output.stderr.trim()
            )
        }
    }
}

type PipeContents = Receiver<std::io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(mut pipe: R) -> PipeContents {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = pipe.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });
    rx
}

/// Waits for a pipe reader to hit EOF.
///
/// A background process started by the command can keep the pipe open after
/// the command itself exits, so the wait is bounded by the same deadline.
fn collect(pipe: Option<PipeContents>, deadline: Option<Instant>) -> anyhow::Result<String> {
    let Some(pipe) = pipe else {
        return Ok(String::new());
    };
    let received = match deadline {
        Some(deadline) => pipe
            .recv_timeout(deadline.saturating_duration_since(Instant::now()))
            .map_err(|e| match e {
                RecvTimeoutError::Timeout => {
                    anyhow::anyhow!("output still open at the deadline (held by a background process?)")
                }
                RecvTimeoutError::Disconnected => anyhow::anyhow!("Output reader thread stopped"),
            })?,
        None => pipe
            .recv()
            .map_err(|_| anyhow::anyhow!("Output reader thread stopped"))?,
    };
    let bytes = received.context("Failed to read command output")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn wait_until(
    child: &mut Child,
    deadline: Option<Instant>,
    timeout: Duration,
) -> anyhow::Result<ExitStatus> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            let _ = child.kill();
            let _ = child.wait();
            anyhow::bail!("timed out after {}s", timeout.as_secs_f32());
        }
        thread::sleep(Duration::from_millis(PROCESS_POLL_MS));
    }
}
