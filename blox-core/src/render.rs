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

//! Per-line display fragments and the differential render pass.
//!
//! Each line has a cache slot that is either stale or holds the fragment
//! built the last time the line was rendered. Edits mark slots stale; a
//! change of selection marks every line between the old and new selection
//! stale too, since selection styling lives on the tokens. [`TextBuffer::render_all`]
//! then rebuilds only the stale slots and hands back shared fragments, so
//! untouched lines come back as the very same `Arc`.

use crate::buffer::{LineId, TextBuffer};
use crate::error::EditError;
use crate::position::{Position, TextRange};
use crate::tokenizer::slice_cols;
use std::sync::Arc;
use tracing::trace;

/// What clicking a token does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAction {
    /// Collapse the selection to a caret here
    MoveCursor(Position),
}

impl TokenAction {
    pub fn apply(&self, buffer: &mut TextBuffer) -> Result<(), EditError> {
        match *self {
            TokenAction::MoveCursor(pos) => buffer.move_cursor(pos.line, pos.col),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenElement {
    /// Where the token sits in the buffer
    pub range: TextRange,
    /// Display text, after symbol substitution
    pub text: String,
    /// Whether any of the token's chars are selected
    pub selected: bool,
    pub action: TokenAction,
}

impl TokenElement {
    pub fn activate(&self, buffer: &mut TextBuffer) -> Result<(), EditError> {
        self.action.apply(buffer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentElement {
    /// The caret, between two tokens
    Cursor,
    Token(TokenElement),
}

/// Everything the UI needs to draw one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFragment {
    /// Stable key for the line
    pub key: LineId,
    pub indent_level: usize,
    /// The indent marker glyph repeated `indent_level` times
    pub indent_marker: String,
    pub elements: Vec<FragmentElement>,
}

impl LineFragment {
    pub fn tokens(&self) -> impl Iterator<Item = &TokenElement> {
        self.elements.iter().filter_map(|e| match e {
            FragmentElement::Token(token) => Some(token),
            FragmentElement::Cursor => None,
        })
    }

    pub fn has_cursor(&self) -> bool {
        self.elements.contains(&FragmentElement::Cursor)
    }
}

#[derive(Debug, Clone, Default)]
pub enum RenderSlot {
    #[default]
    Stale,
    Cached(Arc<LineFragment>),
}

impl RenderSlot {
    pub fn fragment(&self) -> Option<&Arc<LineFragment>> {
        match self {
            RenderSlot::Stale => None,
            RenderSlot::Cached(fragment) => Some(fragment),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, RenderSlot::Stale)
    }
}

impl TextBuffer {
    pub fn is_line_dirty(&self, index: usize) -> bool {
        self.rendered.get(index).is_some_and(RenderSlot::is_stale)
    }

    /// Rebuild and cache the fragment for line `index`.
    pub fn render_line(&mut self, index: usize) -> Option<Arc<LineFragment>> {
        let text = self.lines.get(index)?;
        let key = self.line_ids[index];

        let indent_level = self.tokenizer.indent_level(text, self.indent);
        let indent_marker = self
            .config
            .indent_marker
            .to_string()
            .repeat(indent_level);

        let caret = Some(self.selection)
            .filter(|s| s.is_empty() && s.start.line == index)
            .map(|s| s.start.col);
        let selection = self.last_rendered_selection.normalized();

        let ranges = self.tokenizer.split_line(index, text);
        let mut elements = Vec::with_capacity(ranges.len() + 1);
        let mut cursor_placed = caret.is_none();

        for range in ranges {
            if !cursor_placed && caret.is_some_and(|col| col <= range.start.col) {
                elements.push(FragmentElement::Cursor);
                cursor_placed = true;
            }
            let token = slice_cols(text, range.start.col, range.end.col);
            elements.push(FragmentElement::Token(TokenElement {
                range,
                text: self.tokenizer.display_text(token).to_string(),
                selected: selection.intersects(&range),
                action: TokenAction::MoveCursor(range.end),
            }));
        }
        if !cursor_placed {
            elements.push(FragmentElement::Cursor);
        }

        let fragment = Arc::new(LineFragment {
            key,
            indent_level,
            indent_marker,
            elements,
        });
        self.rendered[index] = RenderSlot::Cached(fragment.clone());
        Some(fragment)
    }

    /// Bring every line's fragment up to date and return them all, in order.
    pub fn render_all(&mut self) -> Vec<Arc<LineFragment>> {
        let selection_changed = self.last_rendered_selection != self.selection;
        if selection_changed {
            let (old_first, old_last) = self.last_rendered_selection.line_span();
            let (new_first, new_last) = self.selection.line_span();
            for line in old_first.min(new_first)..=old_last.max(new_last) {
                self.mark_dirty(line);
            }
            self.last_rendered_selection = self.selection;
        }

        let mut recomputed = 0;
        let mut fragments = Vec::with_capacity(self.lines.len());
        for index in 0..self.lines.len() {
            let cached = self.rendered[index].fragment().cloned();
            let fragment = match cached {
                Some(fragment) => Some(fragment),
                None => {
                    recomputed += 1;
                    self.render_line(index)
                }
            };
            fragments.extend(fragment);
        }

        trace!(
            lines = self.lines.len(),
            recomputed,
            selection_changed,
            "render pass"
        );
        fragments
    }
}
