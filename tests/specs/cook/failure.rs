// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A failed recipe fails the whole run.

use crate::prelude::*;

const BURNT: &str = "\
dinner : burnt salad
\ttouch dinner.txt

burnt :
\tfalse

salad :
\ttouch salad.txt
";

#[test]
fn failing_recipe_fails_the_run() {
    let project = Project::with_cookbook(BURNT);
    project.cook().fails().stderr_has("recipe burnt failed");
    assert!(!project.exists("dinner.txt"));
    assert!(!project.exists("salad.txt"));
}

#[test]
fn failing_stage_mid_pipeline_fails_the_recipe() {
    let project = Project::with_cookbook("main :\n\techo x | false | cat > out.txt\n");
    project.cook().fails().stderr_has("step `false` failed");
}

#[test]
fn step_status_is_ignored_without_pipefail() {
    let project = Project::with_cookbook(BURNT);
    project.cook().args(&["--no-pipefail"]).passes();
    assert!(project.exists("dinner.txt"));
}

#[test]
fn missing_input_fails_even_without_pipefail() {
    let project = Project::with_cookbook("main :\n\tcat < missing.txt > out.txt\n");
    project.cook().args(&["--no-pipefail"]).fails().stderr_has("can't open 'missing.txt' for input");
}

#[test]
fn unknown_program_fails_the_recipe() {
    Project::with_cookbook("main :\n\tcook-no-such-program\n")
        .cook()
        .fails()
        .stderr_has("failed to spawn `cook-no-such-program`");
}
