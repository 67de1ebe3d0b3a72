// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::recipe::{Cookbook, CookbookError, RecipeDecl, Step, Task};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for recipe graphs.
pub mod strategies {
    use crate::recipe::{RecipeDecl, Step, Task};
    use proptest::prelude::*;

    /// Acyclic recipe declarations: recipe `i` may only depend on recipes
    /// declared after it, so recipe 0 is a natural root.
    pub fn arb_dag(max_recipes: usize) -> impl Strategy<Value = Vec<RecipeDecl>> {
        (1..=max_recipes.max(1))
            .prop_flat_map(|n| {
                let edges = (0..n)
                    .map(move |i| prop::collection::vec(any::<bool>(), n - i - 1))
                    .collect::<Vec<_>>();
                (Just(n), edges)
            })
            .prop_map(|(n, edges)| {
                (0..n)
                    .map(|i| {
                        let depends_on = edges[i]
                            .iter()
                            .enumerate()
                            .filter(|(_, keep)| **keep)
                            .map(|(offset, _)| format!("r{}", i + 1 + offset))
                            .collect();
                        RecipeDecl::new(format!("r{i}"))
                            .depends_on(depends_on)
                            .tasks(vec![Task::new(vec![Step::new(["true"])])])
                    })
                    .collect()
            })
    }
}

/// Declaration with one no-op task, for graph-shape tests.
pub fn decl(name: &str, depends_on: &[&str]) -> RecipeDecl {
    RecipeDecl::new(name)
        .depends_on(depends_on.iter().map(|d| d.to_string()).collect())
        .tasks(vec![noop_task()])
}

pub fn noop_task() -> Task {
    Task::new(vec![Step::new(["true"])])
}

/// Link a cookbook from `(name, dependencies)` pairs.
pub fn cookbook(recipes: &[(&str, &[&str])]) -> Result<Cookbook, CookbookError> {
    Cookbook::link(recipes.iter().map(|(name, deps)| decl(name, deps)).collect())
}

/// `eggs_benedict` style diamond: root needs two recipes that share a leaf.
pub fn diamond() -> Result<Cookbook, CookbookError> {
    cookbook(&[
        ("benedict", &["eggs", "muffin"]),
        ("eggs", &["water"]),
        ("muffin", &["water"]),
        ("water", &[]),
    ])
}
