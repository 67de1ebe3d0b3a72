// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration errors stop the run before any recipe starts.

use crate::prelude::*;

#[test]
fn missing_default_cookbook() {
    Project::empty().cook().fails().stderr_has("can't open cookbook './rsrc/cookbook.ckb'");
}

#[test]
fn missing_named_cookbook() {
    Project::empty()
        .cook()
        .args(&["-f", "nowhere.ckb"])
        .fails()
        .stderr_has("can't open cookbook 'nowhere.ckb'");
}

#[test]
fn syntax_error_reports_file_and_line() {
    let project = Project::with_cookbook("toast :\n\ttouch toast\n\nmain\n\ttouch main\n");
    project
        .cook()
        .fails()
        .stderr_has("rsrc/cookbook.ckb:4: expected ':' after recipe name 'main' but 'newline' was seen");
    assert!(!project.exists("toast"));
}

#[test]
fn trailing_pipe_is_reported() {
    Project::with_cookbook("main :\n\techo hi |\n")
        .cook()
        .fails()
        .stderr_has("cookbook.ckb:2: pipeline terminated by '|'");
}

#[test]
fn unknown_dependency_is_reported() {
    let project = Project::with_cookbook("main : ghost\n\ttouch main\n");
    project.cook().fails().stderr_has("recipe main depends on non-existent sub-recipe ghost");
    assert!(!project.exists("main"));
}

#[test]
fn unknown_recipe_is_reported() {
    let project = Project::with_cookbook("main :\n\ttouch main\n");
    project.cook().args(&["ghost"]).fails().stderr_has("recipe ghost not found");
    assert!(!project.exists("main"));
}
