// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--print` shows the parsed cookbook without cooking it.

use crate::prelude::*;

const MESSY: &str = "main:   eggs\n    crack eggs|poach   <water > out\n\n\n\neggs :\n  touch eggs\n";

const CANONICAL: &str = "main : eggs\n\tcrack eggs | poach < water > out\n\neggs : \n\ttouch eggs\n\n\n";

#[test]
fn print_shows_canonical_cookbook() {
    let project = Project::with_cookbook(MESSY);
    project.cook().args(&["--print"]).passes().stdout_eq(CANONICAL);
    assert!(!project.exists("eggs"));
}

#[test]
fn printed_cookbook_reads_back_the_same() {
    let project = Project::with_cookbook("a\\ b : c\n\techo x\\|y > out\\ file\n\nc :\n\tsort < in | uniq\n");
    let printed = project.cook().args(&["--print"]).passes().stdout();
    project.file("again.ckb", &printed);
    project.cook().args(&["--print", "-f", "again.ckb"]).passes().stdout_eq(&printed);
}
