// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooks carry out one recipe each and report how it went.

use async_trait::async_trait;
use cook_core::Task;

use crate::pipeline::PipelineExecutor;

/// A recipe handed to a cook: its name and an owned copy of its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub recipe: String,
    pub tasks: Vec<Task>,
}

/// Result of cooking one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookOutcome {
    Done,
    Failed(String),
}

impl CookOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, CookOutcome::Done)
    }
}

/// Worker that cooks recipes.
///
/// Cooks never touch the cookbook; the dispatcher owns all run state and
/// learns about a recipe only through the returned outcome.
#[async_trait]
pub trait Cook: Clone + Send + Sync + 'static {
    async fn cook(&self, order: Order) -> CookOutcome;
}

/// Cook that runs every task of the recipe as a process pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineCook {
    executor: PipelineExecutor,
}

impl PipelineCook {
    pub fn new(executor: PipelineExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Cook for PipelineCook {
    async fn cook(&self, order: Order) -> CookOutcome {
        match self.executor.run_tasks(&order.tasks).await {
            Ok(outcomes) => {
                tracing::debug!(recipe = %order.recipe, tasks = outcomes.len(), "tasks complete");
                CookOutcome::Done
            }
            Err(e) => {
                tracing::error!(recipe = %order.recipe, error = %e, "task failed");
                CookOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{Cook, CookOutcome, Order};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded cook call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CookCall {
        pub recipe: String,
        pub tasks: usize,
    }

    #[derive(Default)]
    struct FakeCookState {
        calls: Vec<CookCall>,
        finished: Vec<String>,
        failures: HashMap<String, String>,
        panics: HashSet<String>,
        delays: HashMap<String, Duration>,
        default_delay: Duration,
        active: usize,
        peak: usize,
    }

    /// Fake cook for testing. Scripts failures, panics and delays per recipe
    /// and records start and finish order and peak concurrency.
    #[derive(Clone, Default)]
    pub struct FakeCook {
        inner: Arc<Mutex<FakeCookState>>,
    }

    impl FakeCook {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make `recipe` fail with `reason`.
        pub fn fail(self, recipe: &str, reason: &str) -> Self {
            self.inner.lock().failures.insert(recipe.to_string(), reason.to_string());
            self
        }

        /// Make the task cooking `recipe` panic.
        pub fn panic_on(self, recipe: &str) -> Self {
            self.inner.lock().panics.insert(recipe.to_string());
            self
        }

        /// Hold `recipe` for `delay` before it completes.
        pub fn delay(self, recipe: &str, delay: Duration) -> Self {
            self.inner.lock().delays.insert(recipe.to_string(), delay);
            self
        }

        /// Delay for recipes without their own.
        pub fn default_delay(self, delay: Duration) -> Self {
            self.inner.lock().default_delay = delay;
            self
        }

        pub fn calls(&self) -> Vec<CookCall> {
            self.inner.lock().calls.clone()
        }

        /// Recipe names in the order cooking started.
        pub fn started(&self) -> Vec<String> {
            self.inner.lock().calls.iter().map(|c| c.recipe.clone()).collect()
        }

        /// Recipe names in the order cooking ended.
        pub fn finished(&self) -> Vec<String> {
            self.inner.lock().finished.clone()
        }

        /// Most recipes ever cooking at once.
        pub fn peak_concurrency(&self) -> usize {
            self.inner.lock().peak
        }
    }

    #[async_trait]
    impl Cook for FakeCook {
        #[allow(clippy::panic)]
        async fn cook(&self, order: Order) -> CookOutcome {
            let (delay, failure, panics) = {
                let mut state = self.inner.lock();
                state
                    .calls
                    .push(CookCall { recipe: order.recipe.clone(), tasks: order.tasks.len() });
                state.active += 1;
                state.peak = state.peak.max(state.active);
                let delay = state.delays.get(&order.recipe).copied().unwrap_or(state.default_delay);
                (
                    delay,
                    state.failures.get(&order.recipe).cloned(),
                    state.panics.contains(&order.recipe),
                )
            };

            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }

            {
                let mut state = self.inner.lock();
                state.active -= 1;
                state.finished.push(order.recipe.clone());
            }

            if panics {
                panic!("scripted panic cooking {}", order.recipe);
            }
            match failure {
                Some(reason) => CookOutcome::Failed(reason),
                None => CookOutcome::Done,
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{CookCall, FakeCook};

#[cfg(test)]
#[path = "cook_tests.rs"]
mod tests;
