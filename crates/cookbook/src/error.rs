// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cookbook parse errors.

use std::path::PathBuf;

use cook_core::CookbookError;
use thiserror::Error;

use crate::lexer::TokenKind;

/// Errors reading a cookbook. Syntax errors carry the 1-based line number.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{line}: expected recipe name but '{found}' was seen")]
    ExpectedRecipeName { found: TokenKind, line: usize },

    #[error("{line}: expected ':' after recipe name '{recipe}' but '{found}' was seen")]
    MissingColon { recipe: String, found: String, line: usize },

    #[error("{line}: missing filename in input or output redirection")]
    MissingFilename { line: usize },

    #[error("{line}: redundant input or output redirection")]
    RedundantRedirection { line: usize },

    #[error("{line}: pipeline terminated by '|' -- another step is required")]
    TrailingPipe { line: usize },

    #[error("{line}: pipeline stage has no command")]
    EmptyStage { line: usize },

    #[error("{line}: unexpected '{found}' after redirection")]
    UnexpectedToken { found: TokenKind, line: usize },

    #[error(transparent)]
    Link(#[from] CookbookError),

    #[error("can't open cookbook '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

impl ParseError {
    /// Line of the offending token, for syntax errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ExpectedRecipeName { line, .. }
            | Self::MissingColon { line, .. }
            | Self::MissingFilename { line }
            | Self::RedundantRedirection { line }
            | Self::TrailingPipe { line }
            | Self::EmptyStage { line }
            | Self::UnexpectedToken { line, .. } => Some(*line),
            Self::Link(_) | Self::Io { .. } => None,
        }
    }
}
