//! Action execution: command construction and run-to-completion sequencing
//!
//! One invocation per user submission. The sequencing contract: validate,
//! confirm (when the catalog carries a warning), resolve the executable,
//! run the command, wait for the child to exit, then report. Nothing after
//! spawn can be cancelled.
//!
//! The prompt and the subprocess runner sit behind traits so the executor
//! can be driven in tests without a UI or real child processes.

use crate::catalog;
use crate::resolver::Resolver;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// One user submission: a catalog label, or a raw service identifier in
/// advanced mode.
#[derive(Debug, Clone)]
pub struct Selection {
    pub label: String,
    pub advanced: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("no process selected")]
    NoSelection,
    #[error("unknown process '{0}'")]
    UnknownTarget(String),
    #[error("{0} executable not found")]
    ExecutableNotFound(&'static str),
    #[error("{0}")]
    Execution(String),
}

/// Result of one invocation. Declined is the user backing out of a warning:
/// a deliberate no-op, not a failure, and produces no toast.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Success { label: String },
    Declined,
    Failure(ActionError),
}

/// A fully constructed command, kept as argv rather than a shell string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Display form, e.g. `sudo /usr/bin/killall -KILL Dock`
    pub fn rendered(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// What the child process reported after exit.
#[derive(Debug, Clone)]
pub struct ExitReport {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Blocking yes/no confirmation for destructive targets.
pub trait WarningPrompt: Send + Sync {
    fn confirm(&self, warning: &str) -> Result<bool>;
}

/// Runs a command and waits for it to exit.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, cmd: &CommandLine) -> Result<ExitReport>;
}

/// Production runner: spawn, capture stdout/stderr, await exit.
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<ExitReport> {
        let output = Command::new(&cmd.program)
            .args(&cmd.args)
            .output()
            .await
            .with_context(|| format!("failed to spawn {}", cmd.program.display()))?;

        Ok(ExitReport {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Build the argv for a restart: `killall -KILL <target>` for catalog
/// entries (signal+name targets split into separate tokens), `launchctl
/// stop <service>` in advanced mode. Elevation runs the resolved path
/// through sudo.
pub fn build_command(
    exe_path: &Path,
    kill_target: &str,
    advanced: bool,
    elevated: bool,
) -> CommandLine {
    let mut args: Vec<String> = Vec::new();
    if advanced {
        args.push("stop".to_string());
        args.push(kill_target.to_string());
    } else {
        args.push("-KILL".to_string());
        args.extend(kill_target.split_whitespace().map(String::from));
    }

    if elevated {
        let mut sudo_args = vec![exe_path.to_string_lossy().into_owned()];
        sudo_args.append(&mut args);
        CommandLine {
            program: PathBuf::from("sudo"),
            args: sudo_args,
        }
    } else {
        CommandLine {
            program: exe_path.to_path_buf(),
            args,
        }
    }
}

pub struct Executor<'a> {
    resolver: &'a Resolver,
    prompt: &'a dyn WarningPrompt,
    runner: &'a dyn CommandRunner,
    /// Pause after child exit before reporting, to let OS teardown settle.
    grace: Duration,
}

impl<'a> Executor<'a> {
    pub fn new(
        resolver: &'a Resolver,
        prompt: &'a dyn WarningPrompt,
        runner: &'a dyn CommandRunner,
        grace: Duration,
    ) -> Self {
        Self {
            resolver,
            prompt,
            runner,
            grace,
        }
    }

    /// Run one restart to completion. Confirmation strictly precedes
    /// resolution, resolution strictly precedes execution, and no result is
    /// reported until the child has fully exited.
    pub async fn perform(&self, selection: &Selection, elevated: bool) -> Outcome {
        if selection.label.is_empty() {
            return Outcome::Failure(ActionError::NoSelection);
        }

        // In advanced mode the label is the service identifier itself.
        let kill_target = if selection.advanced {
            selection.label.clone()
        } else {
            match catalog::kill_target_for(&selection.label) {
                Some(target) => target.to_string(),
                None => {
                    return Outcome::Failure(ActionError::UnknownTarget(selection.label.clone()));
                }
            }
        };

        if !selection.advanced
            && let Some(warning) = catalog::warning_for(&selection.label)
        {
            match self.prompt.confirm(warning) {
                Ok(true) => {
                    log::info!("user confirmed restart of {}", selection.label);
                }
                Ok(false) => {
                    log::info!("user declined restart of {}", selection.label);
                    return Outcome::Declined;
                }
                Err(e) => {
                    return Outcome::Failure(ActionError::Execution(format!(
                        "warning dialog failed: {e:#}"
                    )));
                }
            }
        }

        let exe = if selection.advanced {
            "launchctl"
        } else {
            "killall"
        };
        let Some(exe_path) = self.resolver.resolve(exe).await else {
            return Outcome::Failure(ActionError::ExecutableNotFound(exe));
        };

        let cmd = build_command(&exe_path, &kill_target, selection.advanced, elevated);
        log::info!("running: {}", cmd.rendered());

        let report = match self.runner.run(&cmd).await {
            Ok(report) => report,
            Err(e) => return Outcome::Failure(ActionError::Execution(format!("{e:#}"))),
        };

        // Diagnostics only; the user sees the aggregate outcome.
        if !report.stdout.trim().is_empty() {
            log::debug!("stdout: {}", report.stdout.trim());
        }
        if !report.stderr.trim().is_empty() {
            if report.success {
                log::warn!("stderr with zero exit: {}", report.stderr.trim());
            } else {
                log::debug!("stderr: {}", report.stderr.trim());
            }
        }

        tokio::time::sleep(self.grace).await;

        if report.success {
            Outcome::Success {
                label: selection.label.clone(),
            }
        } else {
            Outcome::Failure(ActionError::Execution(failure_message(&report)))
        }
    }
}

fn failure_message(report: &ExitReport) -> String {
    let stderr = report.stderr.trim();
    if !stderr.is_empty() {
        stderr.to_string()
    } else {
        match report.code {
            Some(code) => format!("command exited with status {}", code),
            None => "command terminated by signal".to_string(),
        }
    }
}
