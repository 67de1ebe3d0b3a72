// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline execution errors.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors running a task's pipeline.
///
/// Everything except [`PipelineError::StepFailed`] is a setup failure: the
/// pipeline could not be built or observed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("can't create pipe: {source}")]
    Pipe { source: std::io::Error },

    #[error("can't open '{}' for input: {source}", path.display())]
    OpenInput { path: PathBuf, source: std::io::Error },

    #[error("can't open '{}' for output: {source}", path.display())]
    OpenOutput { path: PathBuf, source: std::io::Error },

    /// Command not found or could not be spawned.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn { program: String, source: std::io::Error },

    #[error("failed waiting for `{program}`: {source}")]
    Wait { program: String, source: std::io::Error },

    /// A stage ran but did not exit successfully (pipefail only).
    #[error("step `{program}` failed: {status}")]
    StepFailed { program: String, status: ExitStatus },
}
