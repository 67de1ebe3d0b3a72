// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cook-cookbook: reading and writing `.ckb` cookbook files.
//!
//! A cookbook is a sequence of recipe blocks separated by blank lines:
//!
//! ```text
//! benedict : eggs muffin
//!     assemble eggs muffin > plate.txt
//!
//! eggs : water
//!     boil < water.txt | crack > eggs.txt
//! ```
//!
//! Backslash escapes whitespace, `:`, `|`, `<`, `>` and the backslash itself.

mod error;
mod lexer;
mod parser;
mod unparse;

pub use error::ParseError;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_cookbook, parse_file};
pub use unparse::{escape, unparse};
