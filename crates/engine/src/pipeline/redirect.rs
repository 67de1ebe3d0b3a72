// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redirection files and command lookup.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use super::error::PipelineError;

/// Resolve a path relative to `cwd` if it's not absolute.
pub(crate) fn resolve_path(path: impl AsRef<Path>, cwd: Option<&Path>) -> PathBuf {
    let p = path.as_ref();
    match cwd {
        Some(cwd) if !p.is_absolute() => cwd.join(p),
        _ => p.to_path_buf(),
    }
}

/// Open an existing file as the pipeline's standard input.
pub(crate) fn open_input(path: &str, cwd: Option<&Path>) -> Result<File, PipelineError> {
    let resolved = resolve_path(path, cwd);
    File::open(&resolved).map_err(|source| PipelineError::OpenInput { path: resolved, source })
}

/// Create or truncate the pipeline's output file.
pub(crate) fn open_output(path: &str, cwd: Option<&Path>) -> Result<File, PipelineError> {
    let resolved = resolve_path(path, cwd);
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o666)
        .open(&resolved)
        .map_err(|source| PipelineError::OpenOutput { path: resolved, source })
}

/// The `util_dir` copy of `name`, if there is an executable file there.
/// When it is `None`, or fails to start, the bare name is looked up on
/// `PATH`.
pub(crate) fn util_program(name: &str, util_dir: &Path) -> Option<PathBuf> {
    let candidate = util_dir.join(name);
    (!name.is_empty() && is_executable(&candidate)).then_some(candidate)
}

fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "redirect_tests.rs"]
mod tests;
