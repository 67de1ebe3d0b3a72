// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-concurrency dispatch over the recipe graph.
//!
//! The dispatcher is the only writer of recipe status. Each started recipe is
//! cooked on its own tokio task, which reports back over an mpsc channel;
//! the dispatcher blocks on that channel only when every cook is busy or
//! nothing is ready, and reaps every completion already waiting before it
//! dispatches again.

use std::collections::{HashMap, HashSet};

use cook_core::{Cookbook, Link, ReadyQueue, RecipeId, RecipeStatus, WorkerId};
use tokio::sync::mpsc;

use crate::cook::{Cook, CookOutcome, Order};
use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Most recipes cooking at once. Must be positive.
    pub max_cooks: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { max_cooks: 1 }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Recipes in the order they were handed to a cook.
    pub dispatched: Vec<String>,
}

/// A cook's report that it is done with a recipe.
#[derive(Debug)]
struct Completion {
    worker: WorkerId,
    outcome: CookOutcome,
}

pub struct Dispatcher<'a, C: Cook> {
    cookbook: &'a mut Cookbook,
    cook: C,
    config: DispatchConfig,
    queue: ReadyQueue,
    /// Recipes being cooked, by the worker cooking them.
    active: HashMap<WorkerId, RecipeId>,
    next_worker: WorkerId,
    /// Recipes the root needs, root included. Nothing outside runs.
    closure: HashSet<RecipeId>,
    dispatched: Vec<String>,
}

impl<'a, C: Cook> Dispatcher<'a, C> {
    pub fn new(cookbook: &'a mut Cookbook, cook: C, config: DispatchConfig) -> Self {
        Self {
            cookbook,
            cook,
            config,
            queue: ReadyQueue::new(),
            active: HashMap::new(),
            next_worker: WorkerId::new(1),
            closure: HashSet::new(),
            dispatched: Vec::new(),
        }
    }

    /// Cook `root` (the first recipe when `None`) and everything it depends
    /// on. The first failed recipe ends the run once the other active cooks
    /// have finished.
    pub async fn run(mut self, root: Option<&str>) -> Result<RunReport, DispatchError> {
        if self.config.max_cooks == 0 {
            return Err(DispatchError::InvalidConcurrency);
        }
        let root = match root {
            Some(name) => {
                self.cookbook.find(name).ok_or_else(|| DispatchError::UnknownRecipe(name.into()))?
            }
            None => self.cookbook.first().ok_or(DispatchError::Empty)?,
        };

        tracing::info!(
            root = self.cookbook.name(root),
            max_cooks = self.config.max_cooks,
            "starting run"
        );
        self.closure = self.cookbook.closure(root);

        let (tx, mut rx) = mpsc::unbounded_channel();
        if let Err(e) = self.pump(root, &tx, &mut rx).await {
            self.drain(&mut rx).await;
            return Err(e);
        }

        let stalled = self
            .closure
            .iter()
            .filter(|id| self.cookbook.status(**id) != Some(RecipeStatus::Finished))
            .count();
        if stalled > 0 {
            tracing::warn!(stalled, "run ended with recipes that never became ready");
        }
        tracing::info!(dispatched = self.dispatched.len(), "run complete");
        Ok(RunReport { dispatched: self.dispatched })
    }

    async fn pump(
        &mut self,
        root: RecipeId,
        tx: &mpsc::UnboundedSender<Completion>,
        rx: &mut mpsc::UnboundedReceiver<Completion>,
    ) -> Result<(), DispatchError> {
        self.seed(root)?;
        loop {
            while self.active.len() < self.config.max_cooks {
                let Some(link) = self.queue.dequeue() else { break };
                self.start(link, tx)?;
            }
            if self.active.is_empty() {
                return Ok(());
            }

            tracing::trace!(active = self.active.len(), queued = self.queue.len(), "waiting");
            let Some(completion) = rx.recv().await else { return Ok(()) };
            self.complete(completion)?;
            while let Ok(completion) = rx.try_recv() {
                self.complete(completion)?;
            }
        }
    }

    /// Queue every leaf the root needs, walking forward edges depth first.
    /// A root without dependencies is itself the only leaf.
    fn seed(&mut self, root: RecipeId) -> Result<(), DispatchError> {
        if self.cookbook.get(root).is_some_and(|r| r.is_leaf()) {
            let link = Link { name: self.cookbook.name(root).to_string(), recipe: root };
            self.queue.enqueue(self.cookbook, link)?;
            return Ok(());
        }

        let mut visited = HashSet::new();
        let mut stack: Vec<Link> = self.cookbook.depends_on(root).iter().rev().cloned().collect();
        while let Some(link) = stack.pop() {
            if !visited.insert(link.recipe) {
                continue;
            }
            let deps = self.cookbook.depends_on(link.recipe);
            if deps.is_empty() {
                self.queue.enqueue(self.cookbook, link)?;
            } else {
                stack.extend(deps.iter().rev().cloned());
            }
        }
        Ok(())
    }

    fn start(
        &mut self,
        link: Link,
        tx: &mpsc::UnboundedSender<Completion>,
    ) -> Result<(), DispatchError> {
        let worker = self.next_worker;
        self.next_worker = worker.next();

        let name = self.cookbook.name(link.recipe).to_string();
        let tasks = self.cookbook.get(link.recipe).map(|r| r.tasks.clone()).unwrap_or_default();
        if let Some(state) = self.cookbook.state_mut(link.recipe) {
            state.start(&name, worker)?;
        }
        self.active.insert(worker, link.recipe);
        self.dispatched.push(name.clone());
        tracing::debug!(recipe = %name, %worker, active = self.active.len(), "dispatching");

        let cook = self.cook.clone();
        let tx = tx.clone();
        let order = Order { recipe: name, tasks };
        tokio::spawn(async move {
            // Cook on an inner task so a panic becomes a failed completion.
            let outcome = match tokio::spawn(async move { cook.cook(order).await }).await {
                Ok(outcome) => outcome,
                Err(e) => CookOutcome::Failed(format!("cook crashed: {e}")),
            };
            let _ = tx.send(Completion { worker, outcome });
        });
        Ok(())
    }

    /// Record a completion, queueing dependents that became ready.
    fn complete(&mut self, completion: Completion) -> Result<(), DispatchError> {
        let Some(id) = self.settle(completion.worker, &completion.outcome)? else {
            return Ok(());
        };
        let name = self.cookbook.name(id).to_string();
        match completion.outcome {
            CookOutcome::Done => {
                tracing::info!(recipe = %name, worker = %completion.worker, "recipe finished");
                self.release_dependents(id)
            }
            CookOutcome::Failed(reason) => {
                tracing::error!(recipe = %name, %reason, "recipe failed");
                Err(DispatchError::RecipeFailed { recipe: name, reason })
            }
        }
    }

    /// Retire the worker and write the recipe's final status.
    fn settle(
        &mut self,
        worker: WorkerId,
        outcome: &CookOutcome,
    ) -> Result<Option<RecipeId>, DispatchError> {
        let Some(id) = self.active.remove(&worker) else {
            tracing::warn!(%worker, "completion from unknown worker");
            return Ok(None);
        };
        let status =
            if outcome.is_done() { RecipeStatus::Finished } else { RecipeStatus::Failed };
        let name = self.cookbook.name(id).to_string();
        if let Some(state) = self.cookbook.state_mut(id) {
            state.advance(&name, status)?;
        }
        Ok(Some(id))
    }

    fn release_dependents(&mut self, id: RecipeId) -> Result<(), DispatchError> {
        let ready: Vec<Link> = self
            .cookbook
            .depended_on_by(id)
            .iter()
            .filter(|link| self.closure.contains(&link.recipe))
            .filter(|link| self.cookbook.status(link.recipe) == Some(RecipeStatus::Pending))
            .filter(|link| self.cookbook.dependencies_finished(link.recipe))
            .cloned()
            .collect();
        for link in ready {
            self.queue.enqueue(self.cookbook, link)?;
        }
        Ok(())
    }

    /// Wait out every active cook after a fatal error, recording how each
    /// recipe ended. Nothing new is dispatched.
    async fn drain(&mut self, rx: &mut mpsc::UnboundedReceiver<Completion>) {
        if !self.active.is_empty() {
            tracing::info!(active = self.active.len(), "draining active cooks");
        }
        while !self.active.is_empty() {
            let Some(completion) = rx.recv().await else { break };
            if let Err(e) = self.settle(completion.worker, &completion.outcome) {
                tracing::warn!(error = %e, "failed to record drained completion");
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
