//! Utility macros for the lexer.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span over a byte range of one file
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntegerLiteral, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a Span from a start and end byte offset.
///
/// The file name is shared, not copied. Offsets past `u32::MAX` are
/// clamped (see `to_offset`).
///
/// ```ignore
/// let span = MK_SPAN!(lexer.file, start, lexer.position);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($file:expr, $start:expr, $end:expr) => {
        Span {
            start: Position($crate::to_offset($start), Rc::clone(&$file)),
            end: Position($crate::to_offset($end), Rc::clone(&$file)),
        }
    };
}
