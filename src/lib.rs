#![allow(clippy::module_inception)]

use std::{io::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod runner;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: usize,
    /// Byte offset of the lexeme the position points at.
    pub offset: usize,
    pub file: Rc<String>,
}

/// Finds `line` (1-based) in `source`, returning the byte offset it starts at
/// and its text without the line terminator.
pub fn get_line(source: &str, line: usize) -> Option<(usize, &str)> {
    let mut start = 0;

    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            return Some((start, text.trim_end_matches(['\n', '\r'])));
        }
        start += text.len();
    }

    None
}

pub fn display_error(error: &Error, source: &str, out: &mut impl Write) -> std::io::Result<()> {
    /*
        [line 3] Error: unexpected character '@'
        -> script.qw
          |
        3 | var a = @;
          | --------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        writeln!(out, "{}", error)?;
    } else {
        writeln!(out, "{} ({})", error, error.get_tip())?;
    }
    writeln!(out, "-> {}", position.file)?;

    let Some((line_start, line_text)) = get_line(source, position.line) else {
        return Ok(());
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    writeln!(out, "{:>padding$}", "|")?;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    writeln!(out, "{} | {}", line_string, line_text_removed.trim_end())?;

    // The offset can sit on an earlier line, e.g. the opening quote of a
    // multi-line string; there is nothing to point at then.
    let line_end = line_start + line_text.len();
    if (line_start..line_end).contains(&position.offset) {
        let column = line_text[..position.offset - line_start].chars().count();
        let arrows = column.saturating_sub(removed_whitespace) + 1;
        writeln!(out, "{:>padding$} {:->arrows$}", "|", "^")?;
    }

    Ok(())
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
