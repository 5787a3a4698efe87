//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::lexer::tokenize_lossy;
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::IllegalCharacter {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.mk".to_string())),
    );

    assert_eq!(error.get_error_name(), "IllegalCharacter");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.mk".to_string()));
    let error = Error::new(
        ErrorImpl::IllegalCharacter {
            token: "#".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position(), &pos);
}

#[test]
fn test_illegal_character_from_token() {
    let tokens = tokenize_lossy("let $".to_string(), Some("test.mk".to_string()));
    let error = Error::illegal_character(&tokens[1]);

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::IllegalCharacter {
            token: "$".to_string()
        }
    );
    assert_eq!(error.get_position().0, 4);
    assert_eq!(error.get_position().1.as_str(), "test.mk");
}

#[test]
fn test_source_unreadable_error() {
    let error = Error::new(
        ErrorImpl::SourceUnreadable {
            path: "missing.mk".to_string(),
            reason: "No such file or directory".to_string(),
        },
        Position(0, Rc::new("missing.mk".to_string())),
    );

    assert_eq!(error.get_error_name(), "SourceUnreadable");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::IllegalCharacter {
            token: "@".to_string(),
        },
        Position(0, Rc::new("test.mk".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Character `@` is not part of the language"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_escapes_control_characters() {
    let error = Error::new(
        ErrorImpl::IllegalCharacter {
            token: "\0".to_string(),
        },
        Position(0, Rc::new("test.mk".to_string())),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Character `\\x00` is not part of the language"
    );
}

#[test]
fn test_error_tip_for_non_ascii_byte() {
    let tokens = tokenize_lossy("\u{e9}".to_string(), None);
    let error = Error::illegal_character(&tokens[1]);

    assert_eq!(
        error.get_tip().to_string(),
        "Character `\\xa9` is not part of the language"
    );
    assert_eq!(error.get_position().0, 1);
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::IllegalCharacter {
            token: "@".to_string(),
        },
        Position(7, Rc::new("main.mk".to_string())),
    );

    assert_eq!(error.to_string(), "illegal character: \"@\" at main.mk:7");
}

#[test]
fn test_position_out_of_range_error() {
    let error = Error::new(
        ErrorImpl::PositionOutOfRange {
            position: 12,
            length: 4,
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "PositionOutOfRange");
    assert_eq!(
        error.get_tip().to_string(),
        "Offset 12 is past the end of a 4 byte source"
    );
}
