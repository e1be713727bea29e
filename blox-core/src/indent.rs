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

//! Indent unit detection.
//!
//! Any line starting with a tab makes the whole document tab-indented.
//! Otherwise the smallest positive run of leading spaces wins, so nested
//! lines indented by a multiple of the unit don't inflate it.

use std::fmt;

/// One level of indentation for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndentUnit {
    #[default]
    Tab,
    Spaces(usize),
}

impl IndentUnit {
    /// Number of chars the unit occupies in the text
    pub fn len(&self) -> usize {
        match self {
            IndentUnit::Tab => 1,
            IndentUnit::Spaces(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width used when grouping leading spaces into indent levels
    pub fn tab_width(&self, tab_indent_width: usize) -> usize {
        match self {
            IndentUnit::Tab => tab_indent_width,
            IndentUnit::Spaces(n) => *n,
        }
    }
}

impl fmt::Display for IndentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentUnit::Tab => f.write_str("\t"),
            IndentUnit::Spaces(n) => f.write_str(&" ".repeat(*n)),
        }
    }
}

/// Infer the indent unit from the first `max_lines` non-blank lines of `src`.
pub fn detect_indent(src: &str, max_lines: usize) -> IndentUnit {
    let mut smallest: Option<usize> = None;

    for line in src
        .split(['\n', '\r'])
        .filter(|line| !line.is_empty())
        .take(max_lines)
    {
        if line.starts_with('\t') {
            return IndentUnit::Tab;
        }
        let spaces = line.chars().take_while(|&c| c == ' ').count();
        if spaces > 0 && smallest.is_none_or(|s| spaces < s) {
            smallest = Some(spaces);
        }
    }

    smallest.map_or(IndentUnit::Tab, IndentUnit::Spaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_takes_priority() {
        let src = "fn main() {\n    let a = 1;\n\tlet b = 2;\n}";
        assert_eq!(detect_indent(src, 1024), IndentUnit::Tab);
    }

    #[test]
    fn test_minimum_space_run() {
        let src = "a\n    b\n  c\n      d\n";
        assert_eq!(detect_indent(src, 1024), IndentUnit::Spaces(2));
    }

    #[test]
    fn test_defaults_to_tab_without_indentation() {
        assert_eq!(detect_indent("a\nb\nc", 1024), IndentUnit::Tab);
        assert_eq!(detect_indent("", 1024), IndentUnit::Tab);
    }

    #[test]
    fn test_scan_limit() {
        // The tab on the fourth line is never seen
        let src = "x\n    y\n    z\n\tw";
        assert_eq!(detect_indent(src, 3), IndentUnit::Spaces(4));
        assert_eq!(detect_indent(src, 4), IndentUnit::Tab);
    }

    #[test]
    fn test_tab_after_spaces_is_not_tab_indentation() {
        assert_eq!(detect_indent("a\n   \tb", 1024), IndentUnit::Spaces(3));
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(detect_indent("a\r\n  b\r\n", 1024), IndentUnit::Spaces(2));
    }

    #[test]
    fn test_unit_display_and_width() {
        assert_eq!(IndentUnit::Tab.to_string(), "\t");
        assert_eq!(IndentUnit::Spaces(4).to_string(), "    ");
        assert_eq!(IndentUnit::Tab.tab_width(2), 2);
        assert_eq!(IndentUnit::Spaces(3).tab_width(2), 3);
        assert_eq!(IndentUnit::Spaces(3).len(), 3);
    }
}
