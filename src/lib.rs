#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// Byte range of a token; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn is_empty(&self) -> bool {
        self.start.0 == self.end.0
    }
}

/// Converts a byte offset into a `Position` offset.
///
/// Offsets are `u32`; anything past `u32::MAX` (sources over 4 GiB) is
/// clamped to `u32::MAX` rather than wrapping.
#[doc(hidden)]
pub fn to_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

/// Returns the 1-based line number, the line's text, and the byte offset
/// of `position` within that line.
pub fn get_line_at_position(source: &str, position: u32) -> Result<(usize, String, usize), Error> {
    let pos = position as usize;
    let out_of_range = || {
        Error::new(
            ErrorImpl::PositionOutOfRange {
                position: pos,
                length: source.len(),
            },
            Position::null(),
        )
    };

    if pos >= source.len() {
        return Err(out_of_range());
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Ok((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    Err(out_of_range())
}

/// Renders a caret diagnostic for `error` against the source it points into.
pub fn format_error(error: &Error, source: &str) -> Result<String, Error> {
    /*
        Error: IllegalCharacter (Character `@` is not part of the language)
        -> main.mk
          |
        1 | let a = @;
          | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0)?;

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = if let ErrorTip::None = error.get_tip() {
        writeln!(out, "Error: {}", error.get_error_name())
    } else {
        writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip())
    };
    let _ = writeln!(out, "-> {}", position.1);
    let _ = writeln!(out, "{:>padding$}", "|");

    let expanded = line_text.trim_end().replace('\t', TAB);
    let indent = expanded.len() - expanded.trim_start_matches(' ').len();
    let _ = writeln!(out, "{} | {}", line_string, &expanded[indent..]);

    let arrows = display_column(&line_text, line_pos).saturating_sub(indent) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    Ok(out)
}

const TAB: &str = "    ";

/// Display column of the character containing byte `byte_pos`, with tabs
/// counted as `TAB` wide.
fn display_column(line: &str, byte_pos: usize) -> usize {
    line.char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= byte_pos)
        .map(|(_, c)| if c == '\t' { TAB.len() } else { 1 })
        .sum()
}
