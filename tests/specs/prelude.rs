// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs: a scratch project directory and a runner for
//! the `cook` binary with fluent output assertions.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::OnceLock;

/// Path to the `cook` binary, building it once if needed.
///
/// The binary belongs to another workspace package, so cargo does not build
/// it for this test target on its own.
fn cook_bin() -> PathBuf {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
        let status = std::process::Command::new(cargo)
            .args(["build", "--quiet", "-p", "cook", "--bin", "cook"])
            .current_dir(env!("CARGO_MANIFEST_DIR"))
            .status()
            .expect("run cargo build");
        assert!(status.success(), "building cook failed");
        assert_cmd::cargo::cargo_bin("cook")
    })
    .clone()
}

/// `cook` run from the current directory.
pub fn cli() -> CliBuilder {
    CliBuilder::new(&std::env::temp_dir())
}

/// A scratch directory holding a cookbook and whatever its recipes produce.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().expect("create project dir") }
    }

    /// A project whose `rsrc/cookbook.ckb` (the default path) holds `cookbook`.
    pub fn with_cookbook(cookbook: &str) -> Self {
        let project = Self::empty();
        project.file("rsrc/cookbook.ckb", cookbook);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, relative: &str, contents: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, contents).expect("write project file");
    }

    /// Write an executable shell script.
    pub fn script(&self, relative: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        self.file(relative, &format!("#!/bin/sh\n{body}\n"));
        let path = self.path().join(relative);
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("make script executable");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative))
            .unwrap_or_else(|e| panic!("read {relative}: {e}"))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }

    /// `cook` run from the project directory.
    pub fn cook(&self) -> CliBuilder {
        CliBuilder::new(self.path())
    }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    fn new(cwd: &Path) -> Self {
        let mut cmd = assert_cmd::Command::new(cook_bin());
        cmd.current_dir(cwd)
            .env_remove("COOK_FILE")
            .env_remove("COOK_MAX_COOKS")
            .env_remove("COOK_LOG");
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit status 0.
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("run cook");
        let run = RunAssert { output };
        assert!(run.output.status.success(), "expected success\n{}", run.describe());
        run
    }

    /// Run and require exit status 1.
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().expect("run cook");
        let run = RunAssert { output };
        assert_eq!(run.output.status.code(), Some(1), "expected exit 1\n{}", run.describe());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    fn describe(&self) -> String {
        format!("status: {}\nstdout:\n{}\nstderr:\n{}", self.output.status, self.stdout(), self.stderr())
    }
}
