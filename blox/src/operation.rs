// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Editing operations as the host receives them from the command line.
//!
//! Decoding keystrokes is not the engine's job; this is the already-decoded
//! form (`insert:TEXT`, `delete:N`, `move:LINE:COL`, ...) that gets replayed
//! against a buffer.

use blox_core::{EditError, Position, TextBuffer, TextRange};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Insert(String),
    Delete(isize),
    Move { line: usize, col: usize },
    Select { start: Position, end: Position },
    Indent,
    Outdent,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationParseError {
    #[error("unknown operation '{0}' (expected insert, delete, move, select, indent or outdent)")]
    Unknown(String),

    #[error("'{op}' expects {expected}")]
    BadArguments { op: String, expected: &'static str },
}

impl Operation {
    pub fn apply(&self, buffer: &mut TextBuffer) -> Result<(), EditError> {
        match self {
            Operation::Insert(text) => buffer.insert(text),
            Operation::Delete(n) => buffer.delete(*n),
            Operation::Move { line, col } => buffer.move_cursor(*line, *col)?,
            Operation::Select { start, end } => {
                buffer.set_selection(TextRange::new(*start, *end))?
            }
            Operation::Indent => buffer.indent_line(None)?,
            Operation::Outdent => buffer.outdent_line(None)?,
        }
        Ok(())
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn numbers<T: FromStr>(args: &str, count: usize) -> Option<Vec<T>> {
    let parsed: Vec<T> = args
        .split(':')
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;
    (parsed.len() == count).then_some(parsed)
}

impl FromStr for Operation {
    type Err = OperationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, args) = s.split_once(':').unwrap_or((s, ""));
        let bad = |expected| OperationParseError::BadArguments {
            op: op.to_string(),
            expected,
        };

        match op {
            "insert" => Ok(Operation::Insert(unescape(args))),
            "delete" => {
                let n = numbers::<isize>(args, 1).ok_or_else(|| bad("a count"))?;
                Ok(Operation::Delete(n[0]))
            }
            "move" => {
                let v = numbers::<usize>(args, 2).ok_or_else(|| bad("LINE:COL"))?;
                Ok(Operation::Move {
                    line: v[0],
                    col: v[1],
                })
            }
            "select" => {
                let v = numbers::<usize>(args, 4)
                    .ok_or_else(|| bad("START_LINE:START_COL:END_LINE:END_COL"))?;
                Ok(Operation::Select {
                    start: Position::new(v[0], v[1]),
                    end: Position::new(v[2], v[3]),
                })
            }
            "indent" => Ok(Operation::Indent),
            "outdent" => Ok(Operation::Outdent),
            other => Err(OperationParseError::Unknown(other.to_string())),
        }
    }
}
