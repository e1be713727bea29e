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

//! The editing engine.
//!
//! [`TextBuffer`] owns the line array, the permanent [`LineId`] of every line
//! (kept in lockstep with the lines), the single selection/caret and the
//! per-line render cache. Every mutation marks the lines it touches dirty so
//! the next render pass only rebuilds those.

use crate::config::EngineConfig;
use crate::error::EditError;
use crate::indent::{detect_indent, IndentUnit};
use crate::position::{Position, TextRange};
use crate::render::RenderSlot;
use crate::syntax::{ParserSlot, SyntaxNode};
use crate::tokenizer::{byte_offset, Tokenizer};
use tracing::{debug, trace};

/// Permanent identity of a line, used as a render key. Never reused and
/// never renumbered when lines around it are inserted or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(u64);

impl LineId {
    pub fn get(self) -> u64 {
        self.0
    }
}

pub struct TextBuffer {
    // Title / filename
    pub(crate) name: String,
    /// File type; metadata only
    pub(crate) kind: String,
    pub(crate) indent: IndentUnit,
    pub(crate) config: EngineConfig,
    pub(crate) tokenizer: Tokenizer,
    /// Always at least one line
    pub(crate) lines: Vec<String>,
    /// Parallel to `lines`
    pub(crate) line_ids: Vec<LineId>,
    next_line_id: u64,
    /// Parallel to `lines`
    pub(crate) rendered: Vec<RenderSlot>,
    /// Selection as of the last render pass
    pub(crate) last_rendered_selection: TextRange,
    /// Current selection; `start` may come after `end`
    pub(crate) selection: TextRange,
    parser: Option<ParserSlot>,
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("name", &self.name)
            .field("lines", &self.lines.len())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let tokenizer = Tokenizer::new(config.tab_indent_width, config.substitute_symbols);
        let mut buffer = Self {
            name: String::new(),
            kind: "txt".to_string(),
            indent: IndentUnit::Tab,
            config,
            tokenizer,
            lines: Vec::new(),
            line_ids: Vec::new(),
            next_line_id: 0,
            rendered: Vec::new(),
            last_rendered_selection: TextRange::default(),
            selection: TextRange::default(),
            parser: None,
        };
        buffer.splice_line(0, String::new());
        buffer
    }

    /// Replace the whole buffer with `text`. Lines, identities, cache, indent
    /// unit and selection all start over.
    pub fn load_content(&mut self, name: &str, text: &str) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let line_ids: Vec<LineId> = lines.iter().map(|_| self.fresh_line_id()).collect();

        self.name = name.to_string();
        self.rendered = vec![RenderSlot::Stale; lines.len()];
        self.lines = lines;
        self.line_ids = line_ids;
        self.indent = detect_indent(text, self.config.indent_scan_limit);
        self.selection = TextRange::caret(Position::ZERO);
        self.last_rendered_selection = self.selection;

        debug!(
            name,
            lines = self.lines.len(),
            indent = ?self.indent,
            "loaded content"
        );
    }

    /// Set the file type. Has no effect on editing.
    pub fn set_type(&mut self, kind: &str) {
        debug!(name = %self.name, kind, "set file type");
        self.kind = kind.to_string();
    }

    // === ACCESSORS ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn indent_unit(&self) -> IndentUnit {
        self.indent
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_id(&self, index: usize) -> Option<LineId> {
        self.line_ids.get(index).copied()
    }

    /// Length of a line in chars (0 for a line that doesn't exist)
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |l| l.chars().count())
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn is_selection_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn to_raw_string(&self) -> String {
        self.lines.join("\n")
    }

    // === CURSOR ARITHMETIC ===

    /// Position reached by moving `n` chars forward (or backward when
    /// negative). Each line break counts as one char. Clamps at the start of
    /// the buffer and at the end of the last line.
    pub fn get_moved_cursor(&self, pos: Position, n: isize) -> Position {
        let last_line = self.lines.len() - 1;
        let mut line = pos.line.min(last_line);
        let mut col = pos.col;
        let mut n = n;

        while n > 0 {
            let len = self.line_len(line);
            let step = n.unsigned_abs();
            if col + step <= len {
                col += step;
                n = 0;
            } else if line >= last_line {
                col = len;
                n = 0;
            } else {
                // Rest of this line plus the line break
                n -= (len.saturating_sub(col) + 1) as isize;
                col = 0;
                line += 1;
            }
        }

        while n < 0 {
            let step = n.unsigned_abs();
            if step <= col {
                col -= step;
                n = 0;
            } else if line == 0 {
                col = 0;
                n = 0;
            } else {
                n += (col + 1) as isize;
                line -= 1;
                col = self.line_len(line);
            }
        }

        Position::new(line, col)
    }

    /// Collapse the selection to a caret at `(line, col)`.
    pub fn move_cursor(&mut self, line: usize, col: usize) -> Result<(), EditError> {
        let pos = Position::new(line, col);
        self.check_position(pos)?;
        self.selection = TextRange::caret(pos);
        Ok(())
    }

    /// Replace the selection. Both endpoints must be inside the buffer; their
    /// order does not matter.
    pub fn set_selection(&mut self, selection: TextRange) -> Result<(), EditError> {
        self.check_position(selection.start)?;
        self.check_position(selection.end)?;
        self.selection = selection;
        Ok(())
    }

    fn check_line(&self, line: usize) -> Result<(), EditError> {
        if line >= self.lines.len() {
            return Err(EditError::LineOutOfBounds {
                line,
                line_count: self.lines.len(),
            });
        }
        Ok(())
    }

    fn check_position(&self, pos: Position) -> Result<(), EditError> {
        self.check_line(pos.line)?;
        let len = self.line_len(pos.line);
        if pos.col > len {
            return Err(EditError::ColumnOutOfBounds {
                line: pos.line,
                col: pos.col,
                len,
            });
        }
        Ok(())
    }

    // === LINE OPERATIONS ===

    fn fresh_line_id(&mut self) -> LineId {
        let id = LineId(self.next_line_id);
        self.next_line_id += 1;
        id
    }

    /// Mark a line's cached fragment stale. Out of range indices are ignored.
    pub fn mark_dirty(&mut self, index: usize) {
        if let Some(slot) = self.rendered.get_mut(index) {
            *slot = RenderSlot::Stale;
        }
    }

    fn splice_line(&mut self, index: usize, text: String) -> LineId {
        let id = self.fresh_line_id();
        self.line_ids.insert(index, id);
        self.lines.insert(index, text);
        self.rendered.insert(index, RenderSlot::Stale);
        id
    }

    /// Insert a new line before `index` (`index == line_count()` appends).
    pub fn insert_line(&mut self, index: usize, text: &str) -> Result<LineId, EditError> {
        if index > self.lines.len() {
            return Err(EditError::LineOutOfBounds {
                line: index,
                line_count: self.lines.len(),
            });
        }
        let id = self.splice_line(index, text.to_string());
        trace!(index, id = id.get(), "inserted line");
        Ok(id)
    }

    /// Remove lines `[start, end)`. The range is clamped to the buffer. If
    /// every line goes, a single empty line is left behind. Selection
    /// endpoints below the range move up with their text; endpoints inside it
    /// land at the start of whatever line now sits at `start`.
    pub fn delete_lines(&mut self, start: usize, end: usize) {
        let end = end.min(self.lines.len());
        let start = start.min(end);
        if start == end {
            return;
        }

        self.line_ids.drain(start..end);
        self.lines.drain(start..end);
        self.rendered.drain(start..end);
        trace!(start, end, "deleted lines");

        if self.lines.is_empty() {
            self.splice_line(0, String::new());
        }
        let removed = end - start;
        let shift = |pos: Position| {
            if pos.line >= end {
                Position::new(pos.line - removed, pos.col)
            } else if pos.line >= start {
                Position::new(start, 0)
            } else {
                pos
            }
        };
        let (new_start, new_end) = (shift(self.selection.start), shift(self.selection.end));
        self.selection = TextRange::new(
            self.clamp_position(new_start),
            self.clamp_position(new_end),
        );
    }

    fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        Position::new(line, pos.col.min(self.line_len(line)))
    }

    /// Resolve an explicit line or fall back to the selection's start line
    fn target_line(&self, line: Option<usize>) -> Result<usize, EditError> {
        let line = line.unwrap_or(self.selection.start.line);
        self.check_line(line)?;
        Ok(line)
    }

    /// Shift whichever selection endpoints sit on `line` by `delta` columns
    fn shift_selection_on_line(&mut self, line: usize, delta: isize) {
        for pos in [&mut self.selection.start, &mut self.selection.end] {
            if pos.line == line {
                pos.col = pos.col.saturating_add_signed(delta);
            }
        }
    }

    /// Prepend one indent unit to `line` (default: the selection's start line).
    pub fn indent_line(&mut self, line: Option<usize>) -> Result<(), EditError> {
        let line = self.target_line(line)?;
        let unit = self.indent.to_string();

        self.lines[line].insert_str(0, &unit);
        self.shift_selection_on_line(line, unit.len() as isize);
        self.mark_dirty(line);
        Ok(())
    }

    /// Remove one indent unit from the start of `line` (default: the
    /// selection's start line). Falls back to removing a single leading tab
    /// or space; does nothing if the line has no leading indentation.
    pub fn outdent_line(&mut self, line: Option<usize>) -> Result<(), EditError> {
        let line = self.target_line(line)?;
        let unit = self.indent.to_string();
        let text = &self.lines[line];

        let removed = if !unit.is_empty() && text.starts_with(unit.as_str()) {
            unit.len()
        } else if text.starts_with(['\t', ' ']) {
            1
        } else {
            0
        };
        if removed == 0 {
            return Ok(());
        }

        // Indentation is ASCII, so bytes and chars agree here
        self.lines[line].replace_range(..removed, "");
        self.shift_selection_on_line(line, -(removed as isize));
        self.mark_dirty(line);
        Ok(())
    }

    // === SELECTION EDITING ===

    /// Delete the selected text and collapse the selection to a caret at its
    /// start. An empty selection deletes nothing.
    pub fn delete_selection(&mut self) {
        let TextRange { start, end } = self.selection.normalized();

        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let from = byte_offset(line, start.col);
            let to = byte_offset(line, end.col);
            line.replace_range(from..to, "");
        } else {
            let tail = {
                let end_line = &self.lines[end.line];
                end_line[byte_offset(end_line, end.col)..].to_string()
            };
            let line = &mut self.lines[start.line];
            line.truncate(byte_offset(line, start.col));
            line.push_str(&tail);
            self.delete_lines(start.line + 1, end.line + 1);
        }

        self.mark_dirty(start.line);
        self.selection = TextRange::caret(start);
    }

    /// Insert `text` at the caret, replacing the selection if there is one.
    /// Each `\n` starts a new line; the caret ends up after the inserted text.
    pub fn insert(&mut self, text: &str) {
        if !self.is_selection_empty() {
            self.delete_selection();
        }

        let start = self.selection.start;
        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or_default();

        let line = &mut self.lines[start.line];
        let rest = line.split_off(byte_offset(line, start.col));
        line.push_str(first);
        self.mark_dirty(start.line);

        let mut end_line = start.line;
        for segment in segments {
            end_line += 1;
            self.splice_line(end_line, segment.to_string());
        }

        let end = Position::new(end_line, self.line_len(end_line));
        self.lines[end_line].push_str(&rest);
        self.selection = TextRange::caret(end);
    }

    /// Backspace-style delete. With a bare caret, a positive `n` deletes `n`
    /// chars behind the caret and a negative `n` deletes ahead of it. With a
    /// non-empty selection `n` is ignored and the selection is deleted.
    pub fn delete(&mut self, n: isize) {
        if self.is_selection_empty() {
            let target = self.get_moved_cursor(self.selection.start, n.saturating_neg());
            if n > 0 {
                self.selection.start = target;
            } else {
                self.selection.end = target;
            }
        }
        self.delete_selection();
    }

    // === PARSER ===

    pub fn attach_parser(&mut self, slot: ParserSlot) {
        debug!(name = %self.name, ready = slot.is_ready(), "attached syntax parser");
        self.parser = Some(slot);
    }

    /// Parse the current text if a parser is attached and ready.
    pub fn try_parse(&self) -> Option<SyntaxNode> {
        let slot = self.parser.as_ref()?;
        if !slot.is_ready() {
            return None;
        }
        slot.try_parse(&self.to_raw_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_buffer() -> TextBuffer {
        let mut buffer = TextBuffer::new();
        buffer.load_content("test.txt", "Hello\ncruel\nworld!");
        buffer
    }

    fn caret(line: usize, col: usize) -> TextRange {
        TextRange::caret(Position::new(line, col))
    }

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.to_raw_string(), "");
        assert_eq!(buffer.kind(), "txt");
        assert!(buffer.is_selection_empty());
    }

    #[test]
    fn test_load_content_replaces_everything() {
        let mut buffer = test_buffer();
        buffer.move_cursor(2, 3).unwrap();
        let old_ids: Vec<LineId> = (0..3).filter_map(|i| buffer.line_id(i)).collect();

        buffer.load_content("other.py", "def f():\n    pass\n");
        assert_eq!(buffer.name(), "other.py");
        assert_eq!(buffer.lines(), &["def f():", "    pass", ""]);
        assert_eq!(buffer.selection(), caret(0, 0));
        assert_eq!(buffer.indent_unit(), IndentUnit::Spaces(4));

        // Fresh identities, none reused
        for i in 0..buffer.line_count() {
            assert!(!old_ids.contains(&buffer.line_id(i).unwrap()));
        }
    }

    #[test]
    fn test_round_trip() {
        let mut buffer = TextBuffer::new();
        for text in ["", "\n", "a", "\n\nb\n", "  x\n\ty\r\nz\n", "日本\n語"] {
            buffer.load_content("t", text);
            assert_eq!(buffer.to_raw_string(), text);
        }
    }

    #[test]
    fn test_moved_cursor_within_line() {
        let buffer = test_buffer(); // "Hello\ncruel\nworld!"
        assert_eq!(buffer.get_moved_cursor(Position::new(0, 1), 3), Position::new(0, 4));
        assert_eq!(buffer.get_moved_cursor(Position::new(1, 4), -4), Position::new(1, 0));
        assert_eq!(buffer.get_moved_cursor(Position::new(1, 2), 0), Position::new(1, 2));
    }

    #[test]
    fn test_moved_cursor_crosses_lines() {
        let buffer = test_buffer(); // "Hello\ncruel\nworld!"

        // End of "Hello" plus the newline lands at the start of "cruel"
        assert_eq!(buffer.get_moved_cursor(Position::new(0, 5), 1), Position::new(1, 0));
        assert_eq!(buffer.get_moved_cursor(Position::new(0, 0), 6), Position::new(1, 0));
        // Two line breaks in one move
        assert_eq!(buffer.get_moved_cursor(Position::new(0, 2), 12), Position::new(2, 2));

        assert_eq!(buffer.get_moved_cursor(Position::new(1, 0), -1), Position::new(0, 5));
        assert_eq!(buffer.get_moved_cursor(Position::new(2, 2), -12), Position::new(0, 2));
    }

    #[test]
    fn test_moved_cursor_clamps() {
        let buffer = test_buffer();
        assert_eq!(buffer.get_moved_cursor(Position::new(1, 2), -100), Position::ZERO);
        assert_eq!(buffer.get_moved_cursor(Position::new(1, 2), 100), Position::new(2, 6));
        assert_eq!(buffer.get_moved_cursor(Position::new(2, 6), 1), Position::new(2, 6));
    }

    #[test]
    fn test_move_cursor_validates() {
        let mut buffer = test_buffer();
        assert!(buffer.move_cursor(1, 5).is_ok());
        assert_eq!(buffer.selection(), caret(1, 5));

        assert_eq!(
            buffer.move_cursor(3, 0),
            Err(EditError::LineOutOfBounds {
                line: 3,
                line_count: 3
            })
        );
        assert_eq!(
            buffer.move_cursor(0, 6),
            Err(EditError::ColumnOutOfBounds {
                line: 0,
                col: 6,
                len: 5
            })
        );
        // Failed moves leave the selection alone
        assert_eq!(buffer.selection(), caret(1, 5));
    }

    #[test]
    fn test_insert_and_delete_lines() {
        let mut buffer = test_buffer();
        let id = buffer.insert_line(1, "new").unwrap();
        assert_eq!(buffer.lines(), &["Hello", "new", "cruel", "world!"]);
        assert_eq!(buffer.line_id(1), Some(id));
        assert!(buffer.insert_line(10, "x").is_err());

        let cruel = buffer.line_id(2).unwrap();
        buffer.delete_lines(0, 2);
        assert_eq!(buffer.lines(), &["cruel", "world!"]);
        // Identities move with their lines
        assert_eq!(buffer.line_id(0), Some(cruel));
    }

    #[test]
    fn test_delete_lines_keeps_caret_on_its_text() {
        let mut buffer = TextBuffer::new();
        buffer.load_content("five", "a\nb\nc\ndxyz\ne");
        buffer.move_cursor(3, 1).unwrap();
        buffer.delete_lines(0, 2);
        assert_eq!(buffer.line(1), Some("dxyz"));
        assert_eq!(buffer.selection(), caret(1, 1));

        // A caret inside the removed lines lands at the start of the gap
        buffer.move_cursor(1, 3).unwrap();
        buffer.delete_lines(1, 2);
        assert_eq!(buffer.lines(), &["c", "e"]);
        assert_eq!(buffer.selection(), caret(1, 0));
    }

    #[test]
    fn test_delete_all_lines_leaves_one() {
        let mut buffer = test_buffer();
        buffer.move_cursor(2, 4).unwrap();
        buffer.delete_lines(0, 3);
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.selection(), caret(0, 0));
    }

    #[test]
    fn test_insert_single_line() {
        let mut buffer = test_buffer();
        buffer.move_cursor(1, 0).unwrap();
        buffer.insert("very ");
        assert_eq!(buffer.line(1), Some("very cruel"));
        assert_eq!(buffer.selection(), caret(1, 5));
    }

    #[test]
    fn test_insert_multiple_lines() {
        let mut buffer = TextBuffer::new();
        let original = buffer.line_id(0).unwrap();
        buffer.insert("hello\nworld");

        assert_eq!(buffer.lines(), &["hello", "world"]);
        assert_eq!(buffer.selection(), caret(1, 5));
        let first = buffer.line_id(0).unwrap();
        let second = buffer.line_id(1).unwrap();
        assert_ne!(first, second);
        assert!(second > original);
    }

    #[test]
    fn test_insert_splits_line_at_caret() {
        let mut buffer = test_buffer();
        buffer.move_cursor(0, 2).unwrap();
        buffer.insert("y\nsunny\nfe");
        assert_eq!(buffer.lines(), &["Hey", "sunny", "fello", "cruel", "world!"]);
        // Caret sits after the inserted text, before the carried-over tail
        assert_eq!(buffer.selection(), caret(2, 2));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buffer = test_buffer();
        buffer
            .set_selection(TextRange::new(Position::new(2, 0), Position::new(0, 4)))
            .unwrap();
        buffer.insert("p ");
        assert_eq!(buffer.lines(), &["Hellp world!"]);
        assert_eq!(buffer.selection(), caret(0, 6));
    }

    #[test]
    fn test_insert_delete_inverse() {
        let mut buffer = test_buffer();
        buffer.move_cursor(1, 3).unwrap();
        buffer.insert("-ty ");
        assert_eq!(buffer.line(1), Some("cru-ty el"));
        buffer.delete(4);
        assert_eq!(buffer.line(1), Some("cruel"));
        assert_eq!(buffer.selection(), caret(1, 3));
    }

    #[test]
    fn test_delete_backward_across_line() {
        let mut buffer = test_buffer();
        buffer.move_cursor(1, 0).unwrap();
        buffer.delete(1);
        assert_eq!(buffer.lines(), &["Hellocruel", "world!"]);
        assert_eq!(buffer.selection(), caret(0, 5));
    }

    #[test]
    fn test_delete_forward_with_negative_count() {
        let mut buffer = test_buffer();
        buffer.move_cursor(0, 5).unwrap();
        buffer.delete(-2);
        assert_eq!(buffer.lines(), &["Helloruel", "world!"]);
        assert_eq!(buffer.selection(), caret(0, 5));
    }

    #[test]
    fn test_delete_ignores_count_with_selection() {
        let mut buffer = test_buffer();
        buffer
            .set_selection(TextRange::new(Position::new(0, 1), Position::new(0, 3)))
            .unwrap();
        buffer.delete(100);
        assert_eq!(buffer.line(0), Some("Hlo"));
        assert_eq!(buffer.selection(), caret(0, 1));
    }

    #[test]
    fn test_delete_clamps_at_buffer_start() {
        let mut buffer = test_buffer();
        buffer.move_cursor(0, 2).unwrap();
        buffer.delete(10);
        assert_eq!(buffer.line(0), Some("llo"));
        assert_eq!(buffer.selection(), caret(0, 0));
    }

    #[test]
    fn test_delete_selection_across_lines() {
        let mut buffer = test_buffer();
        // Backwards selection gets normalized
        buffer
            .set_selection(TextRange::new(Position::new(2, 1), Position::new(0, 2)))
            .unwrap();
        let first = buffer.line_id(0);
        buffer.delete_selection();
        assert_eq!(buffer.lines(), &["Heorld!"]);
        assert_eq!(buffer.line_id(0), first);
        assert_eq!(buffer.selection(), caret(0, 2));
    }

    #[test]
    fn test_delete_empty_selection_is_noop() {
        let mut buffer = test_buffer();
        buffer.move_cursor(1, 2).unwrap();
        buffer.delete_selection();
        assert_eq!(buffer.to_raw_string(), "Hello\ncruel\nworld!");
        assert_eq!(buffer.selection(), caret(1, 2));
    }

    #[test]
    fn test_delete_whole_document() {
        let mut buffer = test_buffer();
        buffer
            .set_selection(TextRange::new(Position::ZERO, Position::new(2, 6)))
            .unwrap();
        buffer.delete_selection();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.to_raw_string(), "");
    }

    #[test]
    fn test_multibyte_columns() {
        let mut buffer = TextBuffer::new();
        buffer.load_content("u", "héllo wörld");
        buffer.move_cursor(0, 2).unwrap();
        buffer.insert("→");
        assert_eq!(buffer.line(0), Some("hé→llo wörld"));
        buffer.delete(2);
        assert_eq!(buffer.line(0), Some("hllo wörld"));
        assert_eq!(buffer.line_len(0), 10);
    }

    #[test]
    fn test_indent_and_outdent() {
        let mut buffer = TextBuffer::new();
        buffer.load_content("t", "a\n  b\nc");
        assert_eq!(buffer.indent_unit(), IndentUnit::Spaces(2));

        buffer.move_cursor(2, 1).unwrap();
        buffer.indent_line(None).unwrap();
        assert_eq!(buffer.line(2), Some("  c"));
        assert_eq!(buffer.selection(), caret(2, 3));

        buffer.outdent_line(None).unwrap();
        assert_eq!(buffer.line(2), Some("c"));
        assert_eq!(buffer.selection(), caret(2, 1));

        // Nothing to remove
        buffer.outdent_line(None).unwrap();
        assert_eq!(buffer.line(2), Some("c"));
        assert_eq!(buffer.selection(), caret(2, 1));
    }

    #[test]
    fn test_indent_explicit_line_only_shifts_endpoints_on_it() {
        let mut buffer = test_buffer();
        buffer
            .set_selection(TextRange::new(Position::new(0, 2), Position::new(1, 3)))
            .unwrap();
        buffer.indent_line(Some(1)).unwrap();
        assert_eq!(buffer.line(1), Some("\tcruel"));
        assert_eq!(buffer.selection().start, Position::new(0, 2));
        assert_eq!(buffer.selection().end, Position::new(1, 4));

        assert!(buffer.indent_line(Some(3)).is_err());
        assert!(buffer.outdent_line(Some(3)).is_err());
    }

    #[test]
    fn test_outdent_falls_back_to_single_char() {
        let mut buffer = TextBuffer::new();
        buffer.load_content("t", "x\n    y\n      z\n w");
        assert_eq!(buffer.indent_unit(), IndentUnit::Spaces(1));

        let mut buffer = TextBuffer::new();
        buffer.load_content("t", "x\n    y\n  z\n\t w");
        assert_eq!(buffer.indent_unit(), IndentUnit::Tab);

        // No leading tab on line 1, so one space goes
        buffer.outdent_line(Some(1)).unwrap();
        assert_eq!(buffer.line(1), Some("   y"));
        buffer.outdent_line(Some(3)).unwrap();
        assert_eq!(buffer.line(3), Some(" w"));
    }

    #[test]
    fn test_outdent_caret_inside_indent() {
        let mut buffer = TextBuffer::new();
        buffer.load_content("t", "a\n\t\tb");
        buffer.move_cursor(1, 0).unwrap();
        buffer.outdent_line(None).unwrap();
        assert_eq!(buffer.line(1), Some("\tb"));
        assert_eq!(buffer.selection(), caret(1, 0));
    }

    #[test]
    fn test_try_parse_without_parser() {
        let mut buffer = test_buffer();
        assert_eq!(buffer.try_parse(), None);

        let (slot, installer) = ParserSlot::pending();
        buffer.attach_parser(slot);
        assert_eq!(buffer.try_parse(), None);

        installer.install(Box::new(crate::syntax::TokenTreeParser::default()));
        let tree = buffer.try_parse().unwrap();
        assert_eq!(tree.children.len(), 3);

        // Editing still works the same with a parser attached
        buffer.insert("x");
        assert_eq!(buffer.line(0), Some("xHello"));
    }
}
