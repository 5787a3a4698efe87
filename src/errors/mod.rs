//! Error types and error handling for the lexer.
//!
//! This module defines the error types produced around scanning. It includes:
//!
//! - Error structures with source position information
//! - Variants for illegal characters and unreadable sources
//! - Error names and suggestions used by the caret diagnostics

pub mod errors;

#[cfg(test)]
mod tests;
