// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipe run status and its state machine.

use std::fmt;

use crate::worker::WorkerId;
use thiserror::Error;

/// Where a recipe is in its run.
///
/// Transitions only move forward:
/// `Pending → Queued → Running → {Finished | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecipeStatus {
    /// Not yet eligible to run
    #[default]
    Pending,
    /// Every dependency finished; waiting in the ready queue
    Queued,
    /// A worker is executing the recipe's tasks
    Running,
    /// The worker exited successfully
    Finished,
    /// The worker exited with failure
    Failed,
}

impl RecipeStatus {
    /// Check if this status is terminal (finished or failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecipeStatus::Finished | RecipeStatus::Failed)
    }

    /// Whether moving from `self` to `to` respects the state machine.
    ///
    /// `Queued → Queued` is accepted so a recipe reached through several
    /// edges can be offered to the queue more than once.
    pub fn can_advance_to(&self, to: RecipeStatus) -> bool {
        use RecipeStatus::*;
        matches!(
            (self, to),
            (Pending, Queued)
                | (Queued, Queued)
                | (Queued, Running)
                | (Running, Finished)
                | (Running, Failed)
        )
    }
}

impl fmt::Display for RecipeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecipeStatus::Pending => "pending",
            RecipeStatus::Queued => "queued",
            RecipeStatus::Running => "running",
            RecipeStatus::Finished => "finished",
            RecipeStatus::Failed => "failed",
        })
    }
}

/// Rejected status change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("recipe '{recipe}' cannot move from {from} to {to}")]
pub struct TransitionError {
    pub recipe: String,
    pub from: RecipeStatus,
    pub to: RecipeStatus,
}

/// Mutable run state attached to each recipe.
///
/// Only the dispatcher writes this; workers report back through their exit
/// outcome and never touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeState {
    status: RecipeStatus,
    worker: Option<WorkerId>,
}

impl RecipeState {
    pub fn status(&self) -> RecipeStatus {
        self.status
    }

    /// The worker executing (or that executed) this recipe, once started.
    pub fn worker(&self) -> Option<WorkerId> {
        self.worker
    }

    /// Move to `to`, rejecting any transition that is not forward.
    pub fn advance(&mut self, recipe: &str, to: RecipeStatus) -> Result<(), TransitionError> {
        if !self.status.can_advance_to(to) {
            return Err(TransitionError {
                recipe: recipe.to_string(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Mark the recipe running under `worker`.
    pub fn start(&mut self, recipe: &str, worker: WorkerId) -> Result<(), TransitionError> {
        self.advance(recipe, RecipeStatus::Running)?;
        self.worker = Some(worker);
        Ok(())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
