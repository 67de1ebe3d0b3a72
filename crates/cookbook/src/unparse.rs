// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cookbook serialization in a form [`parse_cookbook`](crate::parse_cookbook)
//! reads back to the same graph.

use std::borrow::Cow;
use std::fmt::Write;

use cook_core::{Cookbook, Recipe, Step, Task};

use crate::lexer::is_delim;

/// Backslash-escape whitespace, delimiters and backslashes in a token.
pub fn escape(token: &str) -> Cow<'_, str> {
    let needs_escape = |ch: char| ch.is_whitespace() || is_delim(ch) || ch == '\\';
    if !token.chars().any(needs_escape) {
        return Cow::Borrowed(token);
    }
    let mut out = String::with_capacity(token.len() + 4);
    for ch in token.chars() {
        if needs_escape(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// Render a cookbook as text.
pub fn unparse(cookbook: &Cookbook) -> String {
    let mut out = String::new();
    for recipe in cookbook.recipes() {
        write_recipe(&mut out, recipe);
    }
    out.push('\n');
    out
}

fn write_recipe(out: &mut String, recipe: &Recipe) {
    let deps: Vec<_> = recipe.depends_on.iter().map(|link| escape(&link.name)).collect();
    let _ = writeln!(out, "{} : {}", escape(&recipe.name), deps.join(" "));
    for task in &recipe.tasks {
        write_task(out, task);
    }
    out.push('\n');
}

fn write_task(out: &mut String, task: &Task) {
    out.push('\t');
    let stages: Vec<_> = task.steps.iter().map(render_step).collect();
    out.push_str(&stages.join(" | "));
    if let Some(input) = &task.input {
        let _ = write!(out, " < {}", escape(input));
    }
    if let Some(output) = &task.output {
        let _ = write!(out, " > {}", escape(output));
    }
    out.push('\n');
}

fn render_step(step: &Step) -> String {
    step.words.iter().map(|w| escape(w)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "unparse_tests.rs"]
mod tests;
