// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive-descent parser from cookbook tokens to a linked [`Cookbook`].

use std::path::Path;

use cook_core::{Cookbook, RecipeDecl, Step, Task};

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Parse cookbook text and link its dependency graph.
pub fn parse_cookbook(input: &str) -> Result<Cookbook, ParseError> {
    let decls = Parser::new(Lexer::tokenize(input)).parse_recipes()?;
    tracing::debug!(recipes = decls.len(), "parsed cookbook");
    Ok(Cookbook::link(decls)?)
}

/// Read and parse a cookbook file.
pub fn parse_file(path: &Path) -> Result<Cookbook, ParseError> {
    let input = std::fs::read_to_string(path)
        .map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;
    parse_cookbook(&input)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    /// Line of the next token, or of the last token at end of input.
    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        let token = self.tokens.get(self.pos)?.kind.clone();
        self.pos += 1;
        Some(token)
    }

    /// Consume a newline if one is next. End of input also ends a line.
    fn at_line_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(TokenKind::Newline) => {
                self.pos += 1;
                true
            }
            Some(_) => false,
        }
    }

    fn skip_blank_lines(&mut self) {
        while matches!(self.peek(), Some(TokenKind::Newline)) {
            self.pos += 1;
        }
    }

    fn parse_recipes(&mut self) -> Result<Vec<RecipeDecl>, ParseError> {
        let mut decls = Vec::new();
        loop {
            self.skip_blank_lines();
            if self.peek().is_none() {
                return Ok(decls);
            }
            decls.push(self.parse_recipe()?);
        }
    }

    /// A header line followed by task lines, ended by a blank line.
    fn parse_recipe(&mut self) -> Result<RecipeDecl, ParseError> {
        let mut decl = self.parse_header()?;
        while !self.at_line_end() {
            decl.tasks.push(self.parse_task()?);
        }
        tracing::trace!(recipe = %decl.name, tasks = decl.tasks.len(), "parsed recipe");
        Ok(decl)
    }

    /// `name : dep dep ...`
    fn parse_header(&mut self) -> Result<RecipeDecl, ParseError> {
        let line = self.line();
        let name = match self.advance() {
            Some(TokenKind::Word(name)) => name,
            Some(found) => return Err(ParseError::ExpectedRecipeName { found, line }),
            None => return Err(ParseError::ExpectedRecipeName { found: TokenKind::Newline, line }),
        };

        let line = self.line();
        match self.advance() {
            Some(TokenKind::Colon) => {}
            found => {
                return Err(ParseError::MissingColon {
                    recipe: name,
                    found: found.map(|t| t.to_string()).unwrap_or_else(|| "(EOF)".to_string()),
                    line,
                });
            }
        }

        let mut depends_on = Vec::new();
        while !self.at_line_end() {
            let line = self.line();
            match self.advance() {
                Some(kind) => match kind.as_word() {
                    Some(word) => depends_on.push(word.to_string()),
                    None => return Err(ParseError::UnexpectedToken { found: kind, line }),
                },
                None => break,
            }
        }

        Ok(RecipeDecl::new(name).depends_on(depends_on))
    }

    /// One pipeline line: stages separated by `|`, with `<`/`>` redirections
    /// anywhere after a stage.
    fn parse_task(&mut self) -> Result<Task, ParseError> {
        let mut task = Task::default();
        loop {
            let line = self.line();
            let words = self.parse_words();
            if words.is_empty() {
                return Err(ParseError::EmptyStage { line });
            }
            task.steps.push(Step { words });

            // Redirections, then either `|` (another stage) or end of line.
            loop {
                let line = self.line();
                if self.at_line_end() {
                    return Ok(task);
                }
                match self.advance() {
                    Some(TokenKind::Pipe) => {
                        if matches!(self.peek(), None | Some(TokenKind::Newline)) {
                            return Err(ParseError::TrailingPipe { line });
                        }
                        break;
                    }
                    Some(TokenKind::Less) => {
                        let path = self.parse_filename(line)?;
                        set_once(&mut task.input, path, line)?;
                    }
                    Some(TokenKind::Greater) => {
                        let path = self.parse_filename(line)?;
                        set_once(&mut task.output, path, line)?;
                    }
                    Some(found) => return Err(ParseError::UnexpectedToken { found, line }),
                    None => return Ok(task),
                }
            }
        }
    }

    /// Words up to the next `|`, `<`, `>` or newline.
    fn parse_words(&mut self) -> Vec<String> {
        let mut words = Vec::new();
        while let Some(word) = self.peek().and_then(TokenKind::as_word) {
            words.push(word.to_string());
            self.pos += 1;
        }
        words
    }

    fn parse_filename(&mut self, line: usize) -> Result<String, ParseError> {
        match self.peek().and_then(TokenKind::as_word) {
            Some(path) => {
                let path = path.to_string();
                self.pos += 1;
                Ok(path)
            }
            None => Err(ParseError::MissingFilename { line }),
        }
    }
}

fn set_once(slot: &mut Option<String>, path: String, line: usize) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::RedundantRedirection { line });
    }
    *slot = Some(path);
    Ok(())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
