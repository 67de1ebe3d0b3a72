// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tokenizer for cookbook text.

use std::fmt;

/// Kinds of cookbook tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A word, with escapes already removed.
    Word(String),
    Colon,
    Pipe,
    Less,
    Greater,
    Newline,
}

impl TokenKind {
    /// The text a word-like token contributes to a step or dependency list.
    ///
    /// An unescaped `:` outside a recipe header is an ordinary word.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            TokenKind::Word(w) => Some(w),
            TokenKind::Colon => Some(":"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(w) => f.write_str(w),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Pipe => f.write_str("|"),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::Newline => f.write_str("newline"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line the token starts on.
    pub line: usize,
}

/// Characters that form single-character tokens unless escaped.
pub(crate) fn is_delim(ch: char) -> bool {
    matches!(ch, ':' | '|' | '<' | '>')
}

/// Cookbook lexer.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { chars: input.chars().peekable(), line: 1 }
    }

    /// Tokenize the entire input.
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::with_capacity(input.len() / 4 + 1);
        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        // Skip whitespace other than newline.
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' || !ch.is_whitespace() {
                break;
            }
            self.chars.next();
        }

        let line = self.line;
        let ch = *self.chars.peek()?;
        let kind = match ch {
            '\n' => {
                self.chars.next();
                self.line += 1;
                TokenKind::Newline
            }
            ':' | '|' | '<' | '>' => {
                self.chars.next();
                match ch {
                    ':' => TokenKind::Colon,
                    '|' => TokenKind::Pipe,
                    '<' => TokenKind::Less,
                    _ => TokenKind::Greater,
                }
            }
            _ => TokenKind::Word(self.read_word()),
        };
        Some(Token { kind, line })
    }

    /// Read a word up to unescaped whitespace or a delimiter, which is left
    /// unread.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch == '\\' {
                self.chars.next();
                match self.chars.peek() {
                    // A backslash cannot escape the end of a line.
                    None | Some('\n') => word.push('\\'),
                    Some(&escaped) => {
                        word.push(escaped);
                        self.chars.next();
                    }
                }
                continue;
            }
            if ch.is_whitespace() || is_delim(ch) {
                break;
            }
            word.push(ch);
            self.chars.next();
        }
        word
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
