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

//! Lightweight line tokenizer.
//!
//! Splits a line into the token ranges the block view turns into clickable
//! chunks. This is not a language parser: characters fall into a handful of
//! classes and tokens are maximal runs of compatible classes.
//!
//! - Whitespace (code points 0-32) separates tokens and is never part of one.
//! - Separators (brackets, quotes, comma) are always single-char tokens.
//! - Special chars (operator punctuation) group into operator runs.
//! - Neutral chars (`$_-+=/*`) join either an operator run or a word.
//! - Everything else is a word char.

use crate::indent::IndentUnit;
use crate::position::TextRange;
use std::collections::HashMap;

const SEPARATOR_CHARS: &str = "()[]{}'\"`,";
const SPECIAL_CHARS: &str = "~!@#%^&:;<>?\\|";
const NEUTRAL_CHARS: &str = "$_-+=/*";

/// Operator spellings shown as a single symbol in the block view.
/// Only whole tokens are matched.
pub const SYMBOL_TABLE: &[(&str, &str)] = &[
    (">=", "≥"),
    ("<=", "≤"),
    ("!=", "≠"),
    ("<-", "←"),
    ("->", "→"),
    ("=>", "⇒"),
    ("<=>", "⇔"),
    ("<--", "⟵"),
    ("-->", "⟶"),
    ("<->", "⟷"),
    ("<==", "⟸"),
    ("==>", "⟹"),
    ("<==>", "⟺"),
    ("<<-", "↞"),
    ("->>", "↠"),
    ("<-<", "↢"),
    (">->", "↣"),
    ("<-|", "↤"),
    ("|->", "↦"),
    ("-<", "⤙"),
    (">-", "⤚"),
    ("||", "∥"),
    ("<|", "⊲"),
    ("|>", "⊳"),
    ("~=", "≈"),
    ("<+>", "⊕"),
    ("<*>", "⊗"),
    ("/\\", "∧"),
    ("\\/", "∨"),
    ("++", "⧺"),
    ("|=", "⊨"),
    ("|-", "⊢"),
    ("-|", "⊣"),
    ("=|", "⫤"),
    ("||-", "⊩"),
    ("||=", "⊫"),
    ("-||", "⫣"),
    ("=||", "⫥"),
    ("_|_", "⊥"),
    ("...", "…"),
    ("===", "≡"),
    ("!==", "≢"),
    ("[|", "⟦"),
    ("|]", "⟧"),
    ("{|", "⦃"),
    ("|}", "⦄"),
    ("(|", "⦇"),
    ("|)", "⦈"),
    (":=", "≔"),
    ("=:", "≕"),
    ("::=", "⩴"),
    ("::", "∷"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Separator,
    Special,
    Neutral,
    Word,
}

impl CharClass {
    pub fn of(c: char) -> CharClass {
        if (c as u32) <= 32 {
            CharClass::Whitespace
        } else if SEPARATOR_CHARS.contains(c) {
            CharClass::Separator
        } else if SPECIAL_CHARS.contains(c) {
            CharClass::Special
        } else if NEUTRAL_CHARS.contains(c) {
            CharClass::Neutral
        } else {
            CharClass::Word
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    symbols: HashMap<&'static str, &'static str>,
    tab_indent_width: usize,
    substitute_symbols: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(2, true)
    }
}

impl Tokenizer {
    pub fn new(tab_indent_width: usize, substitute_symbols: bool) -> Self {
        Self {
            symbols: SYMBOL_TABLE.iter().copied().collect(),
            tab_indent_width: tab_indent_width.max(1),
            substitute_symbols,
        }
    }

    /// Split `text` (the contents of line `line`) into token ranges, in order.
    pub fn split_line(&self, line: usize, text: &str) -> Vec<TextRange> {
        let classes: Vec<CharClass> = text.chars().map(CharClass::of).collect();
        let len = classes.len();
        let mut ranges = Vec::new();
        let mut p = 0;

        while p < len {
            while p < len && classes[p] == CharClass::Whitespace {
                p += 1;
            }
            if p >= len {
                break;
            }

            if classes[p] == CharClass::Separator {
                ranges.push(TextRange::on_line(line, p, p + 1));
                p += 1;
                continue;
            }

            // A leading neutral run joins whatever kind of run follows it
            let mut q = p;
            while q < len && classes[q] == CharClass::Neutral {
                q += 1;
            }
            if q < len {
                let kind = classes[q];
                if matches!(kind, CharClass::Special | CharClass::Word) {
                    while q < len && (classes[q] == kind || classes[q] == CharClass::Neutral) {
                        q += 1;
                    }
                }
            }

            ranges.push(TextRange::on_line(line, p, q));
            p = q;
        }

        ranges
    }

    /// Count leading indentation levels: one per tab, one per run of up to
    /// `tab_width` spaces.
    pub fn indent_level(&self, text: &str, unit: IndentUnit) -> usize {
        let tab_width = unit.tab_width(self.tab_indent_width).max(1);
        let bytes = text.as_bytes();
        let mut p = 0;
        let mut level = 0;

        while p < bytes.len() {
            match bytes[p] {
                b'\t' => p += 1,
                b' ' => {
                    p += bytes[p..]
                        .iter()
                        .take(tab_width)
                        .take_while(|&&b| b == b' ')
                        .count();
                }
                _ => break,
            }
            level += 1;
        }

        level
    }

    /// Symbol for an exact token spelling, if it has one
    pub fn symbol_for(&self, token: &str) -> Option<&'static str> {
        self.symbols.get(token).copied()
    }

    /// Text to display for `token`
    pub fn display_text<'a>(&self, token: &'a str) -> &'a str {
        if !self.substitute_symbols {
            return token;
        }
        self.symbol_for(token).unwrap_or(token)
    }
}

/// Slice `[start_col, end_col)` of `text` by char columns.
pub(crate) fn slice_cols(text: &str, start_col: usize, end_col: usize) -> &str {
    let start = byte_offset(text, start_col);
    let end = byte_offset(text, end_col);
    &text[start..end.max(start)]
}

/// Byte offset of char column `col`, clamped to the end of `text`.
pub(crate) fn byte_offset(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map_or(text.len(), |(offset, _)| offset)
}
