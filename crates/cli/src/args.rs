// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Cook the recipes of a cookbook, running independent recipes in parallel.
#[derive(Debug, Parser)]
#[command(name = "cook", version)]
pub struct Cli {
    /// Cookbook to read
    #[arg(short, long, env = crate::env::FILE, default_value = "./rsrc/cookbook.ckb")]
    pub file: PathBuf,

    /// Most recipes to cook at once
    #[arg(short = 'c', long, env = crate::env::MAX_COOKS, default_value = "1", value_parser = parse_cooks)]
    pub cooks: usize,

    /// Directory searched for step programs before PATH
    #[arg(long, default_value = "./util")]
    pub util_dir: PathBuf,

    /// Ignore the exit status of steps; only setup failures fail a recipe
    #[arg(long)]
    pub no_pipefail: bool,

    /// Print the parsed cookbook and exit without cooking
    #[arg(long)]
    pub print: bool,

    /// Recipe to cook (default: the first recipe in the cookbook)
    pub recipe: Option<String>,
}

fn parse_cooks(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{value}' is not a positive integer")),
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
