// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process pipelines for recipe tasks.
//!
//! Every stage of a task is its own child process. Adjacent stages are joined
//! by OS pipes, which are created close-on-exec so that each child inherits
//! only the two ends wired to its stdin and stdout. The executor drops its own
//! copies as soon as a stage is spawned; a stray write end would keep the
//! next reader waiting for an EOF that never comes.

mod error;
mod redirect;

pub use error::PipelineError;

use std::io;
use std::os::fd::OwnedFd;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use cook_core::{Step, Task};
use tokio::process::{Child, Command};

/// How one stage of a pipeline exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageExit {
    pub program: String,
    pub status: ExitStatus,
}

/// Exit statuses of every stage of a task, in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOutcome {
    pub stages: Vec<StageExit>,
}

impl TaskOutcome {
    pub fn success(&self) -> bool {
        self.stages.iter().all(|stage| stage.status.success())
    }

    /// The rightmost stage that did not exit successfully.
    pub fn last_failure(&self) -> Option<&StageExit> {
        self.stages.iter().rev().find(|stage| !stage.status.success())
    }
}

/// Runs tasks as pipelines of child processes.
#[derive(Debug, Clone)]
pub struct PipelineExecutor {
    util_dir: PathBuf,
    cwd: Option<PathBuf>,
    pipefail: bool,
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self { util_dir: PathBuf::from("./util"), cwd: None, pipefail: true }
    }
}

impl PipelineExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory searched for a stage's program before `PATH`.
    pub fn util_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.util_dir = dir.into();
        self
    }

    /// Working directory for stages. Relative redirection paths and a
    /// relative util directory resolve against it.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// When set (the default), a stage exiting unsuccessfully fails the task.
    /// When cleared, only setup failures do.
    pub fn pipefail(mut self, pipefail: bool) -> Self {
        self.pipefail = pipefail;
        self
    }

    /// Run tasks in order, stopping at the first error.
    pub async fn run_tasks(&self, tasks: &[Task]) -> Result<Vec<TaskOutcome>, PipelineError> {
        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            outcomes.push(self.run_task(task).await?);
        }
        Ok(outcomes)
    }

    /// Run one task: wire its stages together, apply redirections and wait
    /// for every stage to exit.
    pub async fn run_task(&self, task: &Task) -> Result<TaskOutcome, PipelineError> {
        let n = task.steps.len();
        if n == 0 {
            return Ok(TaskOutcome::default());
        }

        // Phase 1: pipes, then redirection files.
        let mut readers = Vec::with_capacity(n - 1);
        let mut writers = Vec::with_capacity(n - 1);
        for _ in 1..n {
            let (reader, writer) =
                std::io::pipe().map_err(|source| PipelineError::Pipe { source })?;
            readers.push(reader);
            writers.push(writer);
        }

        let cwd = self.cwd.as_deref();
        let mut input =
            task.input.as_deref().map(|path| redirect::open_input(path, cwd)).transpose()?;
        let mut output =
            task.output.as_deref().map(|path| redirect::open_output(path, cwd)).transpose()?;
        let util_dir = redirect::resolve_path(&self.util_dir, cwd);

        // Phase 2: spawn every stage. Stage i reads pipe i-1 and writes pipe i;
        // the ends of the pipeline get the redirections or inherit ours.
        let mut readers = readers.into_iter();
        let mut writers = writers.into_iter();
        let mut children: Vec<(String, Child)> = Vec::with_capacity(n);

        for (i, step) in task.steps.iter().enumerate() {
            let stdin: Option<OwnedFd> = if i == 0 {
                input.take().map(OwnedFd::from)
            } else {
                readers.next().map(OwnedFd::from)
            };
            let stdout: Option<OwnedFd> = if i + 1 == n {
                output.take().map(OwnedFd::from)
            } else {
                writers.next().map(OwnedFd::from)
            };

            let spawned = self.spawn_stage(step, &util_dir, stdin.as_ref(), stdout.as_ref());
            drop(stdin);
            drop(stdout);
            match spawned {
                Ok(child) => children.push((step.program().to_string(), child)),
                Err(err) => {
                    tracing::error!(program = step.program(), error = %err, "pipeline setup failed");
                    // Close the unused ends so earlier stages see EOF or EPIPE.
                    drop(readers);
                    drop(writers);
                    reap(children).await;
                    return Err(err);
                }
            }
        }

        // Phase 3: wait for every stage.
        let mut stages = Vec::with_capacity(n);
        let mut wait_error = None;
        for (program, mut child) in children {
            match child.wait().await {
                Ok(status) => {
                    tracing::trace!(%program, %status, "pipeline stage exited");
                    stages.push(StageExit { program, status });
                }
                Err(source) => {
                    wait_error.get_or_insert(PipelineError::Wait { program, source });
                }
            }
        }
        if let Some(err) = wait_error {
            return Err(err);
        }

        let outcome = TaskOutcome { stages };
        if self.pipefail {
            if let Some(failed) = outcome.last_failure() {
                return Err(PipelineError::StepFailed {
                    program: failed.program.clone(),
                    status: failed.status,
                });
            }
        }
        Ok(outcome)
    }

    /// Spawn one stage, trying `util_dir` before `PATH`.
    ///
    /// Each attempt hands the child duplicates of `stdin`/`stdout`; the
    /// caller's originals are dropped once the stage is running.
    fn spawn_stage(
        &self,
        step: &Step,
        util_dir: &Path,
        stdin: Option<&OwnedFd>,
        stdout: Option<&OwnedFd>,
    ) -> Result<Child, PipelineError> {
        let name = step.program();
        if let Some(local) = redirect::util_program(name, util_dir) {
            match self.spawn_program(&local, step, stdin, stdout) {
                Ok(child) => return Ok(child),
                Err(error) => {
                    tracing::debug!(program = %local.display(), %error, "util program did not start, retrying on PATH");
                }
            }
        }
        self.spawn_program(Path::new(name), step, stdin, stdout)
            .map_err(|source| PipelineError::Spawn { program: name.to_string(), source })
    }

    fn spawn_program(
        &self,
        program: &Path,
        step: &Step,
        stdin: Option<&OwnedFd>,
        stdout: Option<&OwnedFd>,
    ) -> io::Result<Child> {
        tracing::debug!(program = %program.display(), args = ?step.args(), "spawning pipeline stage");

        let mut command = Command::new(program);
        command.args(step.args()).stdin(stdio(stdin)?).stdout(stdio(stdout)?);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command.spawn()
    }
}

/// A fresh handle on `fd` for one spawn attempt, or inherit ours.
fn stdio(fd: Option<&OwnedFd>) -> io::Result<Stdio> {
    match fd {
        Some(fd) => Ok(Stdio::from(fd.try_clone()?)),
        None => Ok(Stdio::inherit()),
    }
}

/// Wait out stages that were already running when setup failed.
async fn reap(children: Vec<(String, Child)>) {
    for (program, mut child) in children {
        if let Err(error) = child.wait().await {
            tracing::warn!(%program, %error, "failed to reap pipeline stage");
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
