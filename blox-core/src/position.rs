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

//! Buffer coordinates.
//!
//! A [`Position`] is a `(line, col)` pair ordered lexicographically, and a
//! [`TextRange`] is a half-open span `[start, end)` between two positions.
//! Columns count chars, not bytes.

use std::fmt;

/// A location in the buffer. Ordering is by line, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A half-open span of text. `start <= end` is expected but not enforced;
/// use [`TextRange::normalized`] when the order is not known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty range at `pos`
    pub fn caret(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Range covering `[start_col, end_col)` on a single line
    pub fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self::new(Position::new(line, start_col), Position::new(line, end_col))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `start <= pos < end`
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// True if either endpoint of `other` lies inside this range.
    ///
    /// Not symmetric: a range that fully encloses `self` does not count as
    /// overlapping unless one of its endpoints falls inside.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.contains(other.start) || self.contains(other.end)
    }

    /// True if the two ranges share at least one char. Both ranges are taken
    /// as half-open and must already be normalized; an empty range shares
    /// nothing.
    pub fn intersects(&self, other: &TextRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Same span with the earlier position as `start`
    pub fn normalized(&self) -> TextRange {
        if self.start <= self.end {
            *self
        } else {
            TextRange::new(self.end, self.start)
        }
    }

    /// Inclusive `(first, last)` line numbers touched by this range
    pub fn line_span(&self) -> (usize, usize) {
        let r = self.normalized();
        (r.start.line, r.end.line)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
