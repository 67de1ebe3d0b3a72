// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help and option validation specs

use crate::prelude::*;

#[test]
fn help_shows_usage_and_options() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--file")
        .stdout_has("--cooks")
        .stdout_has("[RECIPE]");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_option_exits_one() {
    cli().args(&["--bogus"]).fails().stderr_has("--bogus");
}

#[test]
fn zero_cooks_is_rejected() {
    let project = Project::with_cookbook("main :\n\ttouch ran\n");
    project.cook().args(&["-c", "0"]).fails().stderr_has("positive integer");
    assert!(!project.exists("ran"));
}

#[test]
fn non_numeric_cooks_is_rejected() {
    cli().args(&["--cooks", "many"]).fails().stderr_has("positive integer");
}

#[test]
fn missing_option_value_is_rejected() {
    cli().args(&["-f"]).fails();
}
