// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task pipelines: stage wiring, redirection and command lookup.

use crate::prelude::*;

#[test]
fn hello_cookbook() {
    let project = Project::with_cookbook("hello :\n\techo hello cook > hello.txt\n");
    project.cook().passes();
    assert_eq!(project.read("hello.txt"), "hello cook\n");
}

#[test]
fn output_without_redirection_goes_to_stdout() {
    Project::with_cookbook("greet :\n\techo good morning\n")
        .cook()
        .passes()
        .stdout_has("good morning");
}

#[test]
fn three_stages_are_wired_in_order() {
    let project = Project::with_cookbook("count :\n\tcat lines.txt | rev | wc -l > count.txt\n");
    project.file("lines.txt", "a\nb\nc\n");
    project.cook().passes();
    assert_eq!(project.read("count.txt").trim(), "3");
}

#[test]
fn redirection_copies_and_truncates() {
    let project = Project::with_cookbook("copy :\n\tcat < in.txt > out.txt\n");
    project.file("in.txt", "first line\nsecond line\n");
    project.file("out.txt", "much longer stale contents that must disappear\n");
    project.cook().passes();
    assert_eq!(project.read("out.txt"), "first line\nsecond line\n");
}

#[test]
fn escaped_words_reach_programs_intact() {
    let project = Project::with_cookbook("quote :\n\techo a\\|b c\\ d > out\\ file.txt\n");
    project.cook().passes();
    assert_eq!(project.read("out file.txt"), "a|b c d\n");
}

#[test]
fn util_directory_is_searched_before_path() {
    let project = Project::with_cookbook("loud :\n\techo quiet | shout > loud.txt\n");
    project.script("util/shout", "tr a-z A-Z");
    project.cook().passes();
    assert_eq!(project.read("loud.txt"), "QUIET\n");
}

#[test]
fn util_directory_can_be_overridden() {
    let project = Project::with_cookbook("loud :\n\techo quiet | shout > loud.txt\n");
    project.script("tools/shout", "tr a-z A-Z");
    project.cook().args(&["--util-dir", "tools"]).passes();
    assert_eq!(project.read("loud.txt"), "QUIET\n");
}

#[test]
fn tasks_run_in_order() {
    let project = Project::with_cookbook(
        "bake :\n\techo dough > dough.txt\n\tcat dough.txt | tr a-z A-Z > loaf.txt\n",
    );
    project.cook().passes();
    assert_eq!(project.read("loaf.txt"), "DOUGH\n");
}
