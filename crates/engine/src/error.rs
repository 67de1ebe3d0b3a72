// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher errors.

use cook_core::TransitionError;
use thiserror::Error;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("number of cooks must be a positive integer")]
    InvalidConcurrency,

    #[error("cookbook contains no recipes")]
    Empty,

    #[error("recipe {0} not found in the cookbook")]
    UnknownRecipe(String),

    #[error("recipe {recipe} failed: {reason}")]
    RecipeFailed { recipe: String, reason: String },

    #[error(transparent)]
    Transition(#[from] TransitionError),
}
