// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Load the cookbook and cook it.

use std::path::Path;

use anyhow::Result;
use cook_cookbook::{parse_file, unparse, ParseError};
use cook_core::{Cookbook, RecipeStatus};
use cook_engine::{DispatchConfig, Dispatcher, PipelineCook, PipelineExecutor};

use crate::args::Cli;
use crate::exit_error::ExitError;

pub async fn run(cli: Cli) -> Result<()> {
    let mut cookbook = load(&cli.file)?;
    tracing::debug!(path = %cli.file.display(), recipes = cookbook.len(), "loaded cookbook");

    if cli.print {
        print!("{}", unparse(&cookbook));
        return Ok(());
    }

    let executor =
        PipelineExecutor::new().util_dir(&cli.util_dir).pipefail(!cli.no_pipefail);
    let config = DispatchConfig { max_cooks: cli.cooks };
    let report = Dispatcher::new(&mut cookbook, PipelineCook::new(executor), config)
        .run(cli.recipe.as_deref())
        .await
        .map_err(|e| ExitError::failure(e.to_string()))?;

    tracing::info!(
        dispatched = report.dispatched.len(),
        finished = cookbook.count_in(RecipeStatus::Finished),
        "all recipes cooked"
    );
    Ok(())
}

/// Parse the cookbook file. Syntax errors are reported as `path:line: message`.
fn load(path: &Path) -> Result<Cookbook, ExitError> {
    parse_file(path).map_err(|e| ExitError::failure(describe(path, &e)))
}

fn describe(path: &Path, err: &ParseError) -> String {
    match err {
        ParseError::Io { .. } => err.to_string(),
        _ if err.line().is_some() => format!("{}:{err}", path.display()),
        _ => format!("{}: {err}", path.display()),
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
