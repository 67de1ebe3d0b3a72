// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cook: run the recipes of a cookbook as process pipelines.

mod args;
mod env;
mod exit_error;
mod run;

use clap::Parser;

use crate::exit_error::ExitError;

#[tokio::main]
async fn main() {
    let cli = match args::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { ExitError::FAILURE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env::log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run::run(cli).await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("cook: {exit}");
                exit.code
            }
            None => {
                eprintln!("cook: {e:#}");
                ExitError::FAILURE
            }
        };
        std::process::exit(code);
    }
}
