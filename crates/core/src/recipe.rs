// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipe graph: recipes, tasks, steps and the dependency edges between them.
//!
//! A [`Cookbook`] is built once by [`Cookbook::link`] and is structurally
//! read-only afterwards. Only each recipe's [`RecipeState`] changes during a
//! run.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::status::{RecipeState, RecipeStatus};

/// Index of a recipe inside its [`Cookbook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(pub usize);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One pipeline stage: a program name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub words: Vec<String>,
}

impl Step {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { words: words.into_iter().map(Into::into).collect() }
    }

    /// The program to run (argv\[0\]).
    pub fn program(&self) -> &str {
        self.words.first().map(String::as_str).unwrap_or_default()
    }

    /// Arguments after the program name (argv\[1..\]).
    pub fn args(&self) -> &[String] {
        self.words.get(1..).unwrap_or_default()
    }
}

/// A pipeline of steps with optional input/output redirection.
///
/// The input file must already exist; the output file is created or
/// truncated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    pub steps: Vec<Step>,
    pub input: Option<String>,
    pub output: Option<String>,
}

impl Task {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps, input: None, output: None }
    }

    /// Read the first stage's stdin from `path`.
    pub fn input(mut self, path: impl Into<String>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Write the last stage's stdout to `path`.
    pub fn output(mut self, path: impl Into<String>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// A resolved dependency edge: the textual name plus the recipe it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub recipe: RecipeId,
}

/// Recipe as declared in a cookbook, before dependency names are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeDecl {
    pub name: String,
    pub depends_on: Vec<String>,
    pub tasks: Vec<Task>,
}

impl RecipeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn depends_on(mut self, depends_on: Vec<String>) -> Self {
        self.depends_on = depends_on;
        self
    }

    pub fn tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }
}

/// A named unit of work with dependencies and a sequential task list.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: String,
    /// Recipes that must finish before this one starts.
    pub depends_on: Vec<Link>,
    /// Recipes that list this one as a dependency (inverse of `depends_on`).
    pub depended_on_by: Vec<Link>,
    pub tasks: Vec<Task>,
    pub state: RecipeState,
}

impl Recipe {
    pub fn status(&self) -> RecipeStatus {
        self.state.status()
    }

    /// A recipe with no dependencies at all.
    pub fn is_leaf(&self) -> bool {
        self.depends_on.is_empty()
    }
}

/// Errors building a cookbook graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookbookError {
    #[error("cookbook contains no recipes")]
    Empty,

    #[error("recipe {recipe} depends on non-existent sub-recipe {dependency}")]
    UnknownDependency { recipe: String, dependency: String },
}

/// The full recipe graph, in file order.
#[derive(Debug, Clone, Default)]
pub struct Cookbook {
    recipes: Vec<Recipe>,
}

impl Cookbook {
    /// Resolve every dependency name and create the inverse edges.
    ///
    /// Names resolve to the first recipe declared with that name.
    pub fn link(decls: Vec<RecipeDecl>) -> Result<Self, CookbookError> {
        if decls.is_empty() {
            return Err(CookbookError::Empty);
        }

        let mut recipes: Vec<Recipe> = decls
            .iter()
            .map(|decl| Recipe {
                name: decl.name.clone(),
                depends_on: Vec::with_capacity(decl.depends_on.len()),
                depended_on_by: Vec::new(),
                tasks: decl.tasks.clone(),
                state: RecipeState::default(),
            })
            .collect();

        for (index, decl) in decls.iter().enumerate() {
            for dependency in &decl.depends_on {
                let target = decls.iter().position(|d| &d.name == dependency).ok_or_else(|| {
                    CookbookError::UnknownDependency {
                        recipe: decl.name.clone(),
                        dependency: dependency.clone(),
                    }
                })?;
                tracing::trace!(recipe = %decl.name, dependency = %dependency, "linked dependency");
                recipes[index]
                    .depends_on
                    .push(Link { name: dependency.clone(), recipe: RecipeId(target) });
                recipes[target]
                    .depended_on_by
                    .push(Link { name: decl.name.clone(), recipe: RecipeId(index) });
            }
        }

        Ok(Self { recipes })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn ids(&self) -> impl Iterator<Item = RecipeId> {
        (0..self.recipes.len()).map(RecipeId)
    }

    /// The default root: the first recipe in the file.
    pub fn first(&self) -> Option<RecipeId> {
        (!self.recipes.is_empty()).then_some(RecipeId(0))
    }

    /// Look up a recipe by name. The first match wins.
    pub fn find(&self, name: &str) -> Option<RecipeId> {
        self.recipes.iter().position(|r| r.name == name).map(RecipeId)
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id.0)
    }

    pub fn state_mut(&mut self, id: RecipeId) -> Option<&mut RecipeState> {
        self.recipes.get_mut(id.0).map(|r| &mut r.state)
    }

    pub fn name(&self, id: RecipeId) -> &str {
        self.get(id).map(|r| r.name.as_str()).unwrap_or_default()
    }

    pub fn status(&self, id: RecipeId) -> Option<RecipeStatus> {
        self.get(id).map(Recipe::status)
    }

    pub fn depends_on(&self, id: RecipeId) -> &[Link] {
        self.get(id).map(|r| r.depends_on.as_slice()).unwrap_or_default()
    }

    pub fn depended_on_by(&self, id: RecipeId) -> &[Link] {
        self.get(id).map(|r| r.depended_on_by.as_slice()).unwrap_or_default()
    }

    /// Whether the recipe at the far end of `link` has finished.
    pub fn is_finished(&self, link: &Link) -> bool {
        self.status(link.recipe) == Some(RecipeStatus::Finished)
    }

    /// Whether every forward dependency of `id` has finished.
    pub fn dependencies_finished(&self, id: RecipeId) -> bool {
        self.depends_on(id).iter().all(|link| self.is_finished(link))
    }

    /// Every recipe reachable from `root` through forward edges, `root` included.
    pub fn closure(&self, root: RecipeId) -> HashSet<RecipeId> {
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() || !seen.insert(id) {
                continue;
            }
            stack.extend(self.depends_on(id).iter().map(|link| link.recipe));
        }
        seen
    }

    /// Count of recipes currently in `status`.
    pub fn count_in(&self, status: RecipeStatus) -> usize {
        self.recipes.iter().filter(|r| r.status() == status).count()
    }
}

#[cfg(test)]
#[path = "recipe_tests.rs"]
mod tests;
