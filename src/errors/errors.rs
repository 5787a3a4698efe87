use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Error for an `Illegal` token, positioned at the offending byte.
    pub fn illegal_character(token: &Token) -> Self {
        Error::new(
            ErrorImpl::IllegalCharacter {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { .. } => "IllegalCharacter",
            ErrorImpl::SourceUnreadable { .. } => "SourceUnreadable",
            ErrorImpl::PositionOutOfRange { .. } => "PositionOutOfRange",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { token } => ErrorTip::Suggestion(format!(
                "Character `{}` is not part of the language",
                printable(token)
            )),
            ErrorImpl::SourceUnreadable { .. } => ErrorTip::None,
            ErrorImpl::PositionOutOfRange { position, length } => ErrorTip::Suggestion(format!(
                "Offset {} is past the end of a {} byte source",
                position, length
            )),
        }
    }
}

/// Single ASCII bytes may be control characters; non-ASCII bytes already
/// arrive escaped from the lexer.
fn printable(token: &str) -> String {
    match token.as_bytes() {
        [byte] => byte.escape_ascii().to_string(),
        _ => token.to_string(),
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.1, self.position.0
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("illegal character: {token:?}")]
    IllegalCharacter { token: String },
    #[error("could not read {path:?}: {reason}")]
    SourceUnreadable { path: String, reason: String },
    #[error("position {position} is out of range for source of length {length}")]
    PositionOutOfRange { position: usize, length: usize },
}
