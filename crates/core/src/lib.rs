// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cook-core: recipe graph, run status and the ready queue shared by the
//! cookbook parser and the scheduling engine.

pub mod queue;
pub mod recipe;
pub mod status;
pub mod worker;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use queue::ReadyQueue;
pub use recipe::{Cookbook, CookbookError, Link, Recipe, RecipeDecl, RecipeId, Step, Task};
pub use status::{RecipeState, RecipeStatus, TransitionError};
pub use worker::WorkerId;
