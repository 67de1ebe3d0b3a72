// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency order, recipe selection and concurrency.

use crate::prelude::*;

const BREAKFAST: &str = "\
breakfast : eggs toast
\tcat eggs.txt toast.txt > breakfast.txt

eggs : water
\tcat water.txt > eggs.txt

toast :
\techo toast > toast.txt

water :
\techo water > water.txt
";

/// Two recipes that each wait for the other to start. They only finish when
/// both are cooking at the same time.
const RENDEZVOUS: &str = "\
both : left right
\ttouch both.done

left :
\ttouch left.ready
\twait_for right.ready

right :
\ttouch right.ready
\twait_for left.ready
";

fn rendezvous() -> Project {
    let project = Project::with_cookbook(RENDEZVOUS);
    project.script(
        "util/wait_for",
        "i=0\nwhile [ ! -f \"$1\" ]; do\n  i=$((i+1))\n  [ $i -gt 200 ] && exit 1\n  sleep 0.05\ndone",
    );
    project
}

#[test]
fn dependencies_are_cooked_first() {
    let project = Project::with_cookbook(BREAKFAST);
    project.cook().passes();
    assert_eq!(project.read("breakfast.txt"), "water\ntoast\n");
}

#[test]
fn dependencies_are_cooked_first_with_many_cooks() {
    let project = Project::with_cookbook(BREAKFAST);
    project.cook().args(&["-c", "4"]).passes();
    assert_eq!(project.read("breakfast.txt"), "water\ntoast\n");
}

#[test]
fn named_recipe_cooks_only_its_dependencies() {
    let project = Project::with_cookbook(BREAKFAST);
    project.cook().args(&["eggs"]).passes();
    assert!(project.exists("eggs.txt"));
    assert!(project.exists("water.txt"));
    assert!(!project.exists("toast.txt"));
    assert!(!project.exists("breakfast.txt"));
}

#[test]
fn cookbook_path_from_flag() {
    let project = Project::empty();
    project.file("books/lunch.ckb", "lunch :\n\techo soup > lunch.txt\n");
    project.cook().args(&["--file", "books/lunch.ckb"]).passes();
    assert_eq!(project.read("lunch.txt"), "soup\n");
}

#[test]
fn cookbook_path_from_environment() {
    let project = Project::empty();
    project.file("books/lunch.ckb", "lunch :\n\techo soup > lunch.txt\n");
    project.cook().env("COOK_FILE", "books/lunch.ckb").passes();
    assert_eq!(project.read("lunch.txt"), "soup\n");
}

#[test]
fn cooks_work_in_parallel() {
    let project = rendezvous();
    project.cook().args(&["-c", "2"]).passes();
    assert!(project.exists("both.done"));
}

#[test]
fn cook_count_from_environment() {
    let project = rendezvous();
    project.cook().env("COOK_MAX_COOKS", "3").passes();
    assert!(project.exists("both.done"));
}
