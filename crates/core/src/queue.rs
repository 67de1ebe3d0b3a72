// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FIFO of recipes whose dependencies are satisfied, awaiting a free cook.
//!
//! The queue behaves as a set with insertion order: a recipe already waiting
//! is never appended a second time, so a diamond-shaped dependency graph
//! schedules the shared recipe once.

use std::collections::VecDeque;

use crate::recipe::{Cookbook, Link};
use crate::status::{RecipeStatus, TransitionError};

#[derive(Debug, Default)]
pub struct ReadyQueue {
    entries: VecDeque<Link>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the linked recipe queued and append it unless a recipe with the
    /// same name is already waiting.
    ///
    /// Returns `true` when the entry was appended.
    pub fn enqueue(&mut self, cookbook: &mut Cookbook, link: Link) -> Result<bool, TransitionError> {
        if let Some(state) = cookbook.state_mut(link.recipe) {
            state.advance(&link.name, RecipeStatus::Queued)?;
        }
        if self.contains(&link.name) {
            tracing::trace!(recipe = %link.name, "already queued");
            return Ok(false);
        }
        tracing::debug!(recipe = %link.name, depth = self.entries.len() + 1, "queued");
        self.entries.push_back(link);
        Ok(true)
    }

    /// Remove and return the head entry.
    pub fn dequeue(&mut self) -> Option<Link> {
        self.entries.pop_front()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Waiting entries, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
