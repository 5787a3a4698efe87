//! Lexical analysis module.
//!
//! This module contains the scanner that converts source text into a
//! stream of tokens for a parser. It handles:
//!
//! - A byte cursor with one character of lookahead
//! - Recognition of keywords, identifiers, integer literals, and operators
//! - Token position tracking for error reporting
//! - Marking unrecognised bytes as `Illegal` tokens instead of failing

pub mod lexer;
pub mod tokens;
