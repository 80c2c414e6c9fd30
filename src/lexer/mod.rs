//! Lexical analysis for qword source text.
//!
//! This module contains the scanner that turns source code into a sequence
//! of tokens. It handles:
//!
//! - Single and two character operators
//! - Keywords, identifiers, numbers and strings
//! - Line tracking for diagnostics
//! - Comments and whitespace

pub mod lexer;
pub mod tokens;
