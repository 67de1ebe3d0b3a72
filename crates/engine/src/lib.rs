// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Execution engine for cookbooks.
//!
//! [`PipelineExecutor`] runs a recipe's tasks as process pipelines,
//! [`Cook`] workers carry out one recipe each, and the [`Dispatcher`] walks
//! the dependency graph, keeping at most `max_cooks` workers busy.

pub mod cook;
pub mod dispatcher;
pub mod error;
pub mod pipeline;

pub use cook::{Cook, CookOutcome, Order, PipelineCook};
pub use dispatcher::{DispatchConfig, Dispatcher, RunReport};
pub use error::DispatchError;
pub use pipeline::{PipelineError, PipelineExecutor, StageExit, TaskOutcome};

#[cfg(any(test, feature = "test-support"))]
pub use cook::{CookCall, FakeCook};
