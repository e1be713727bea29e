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

//! Terminal output for the two ways a document can be shown: the block view
//! built from the engine's line fragments, and the plain raw text.

use blox_core::{FragmentElement, LineFragment, TextBuffer};
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use std::io::Write;

const CURSOR_GLYPH: &str = "│";

/// A way of drawing a document to a terminal
pub trait View {
    fn draw<W: Write>(&mut self, out: &mut W, buffer: &mut TextBuffer) -> std::io::Result<()>;
}

/// Tokens as blocks, with indent markers, symbols, selection and caret
#[derive(Debug, Default)]
pub struct BlockView {
    pub show_line_numbers: bool,
}

/// The document text as stored
#[derive(Debug, Default)]
pub struct RawView;

impl BlockView {
    fn draw_line<W: Write>(
        &self,
        out: &mut W,
        number: usize,
        fragment: &LineFragment,
    ) -> std::io::Result<()> {
        if self.show_line_numbers {
            queue!(out, PrintStyledContent(format!("{number:>4} ").dark_grey()))?;
        }
        if !fragment.indent_marker.is_empty() {
            queue!(
                out,
                PrintStyledContent(fragment.indent_marker.as_str().dark_grey()),
                Print(" ")
            )?;
        }

        for (i, element) in fragment.elements.iter().enumerate() {
            if i > 0 {
                queue!(out, Print(" "))?;
            }
            match element {
                FragmentElement::Cursor => {
                    queue!(out, PrintStyledContent(CURSOR_GLYPH.yellow().bold()))?;
                }
                FragmentElement::Token(token) if token.selected => {
                    queue!(out, PrintStyledContent(token.text.as_str().reverse()))?;
                }
                FragmentElement::Token(token) => {
                    queue!(out, PrintStyledContent(token.text.as_str().on_dark_blue()))?;
                }
            }
        }
        queue!(out, Print("\n"))
    }
}

impl View for BlockView {
    fn draw<W: Write>(&mut self, out: &mut W, buffer: &mut TextBuffer) -> std::io::Result<()> {
        for (number, fragment) in buffer.render_all().iter().enumerate() {
            self.draw_line(out, number + 1, fragment)?;
        }
        out.flush()
    }
}

impl View for RawView {
    fn draw<W: Write>(&mut self, out: &mut W, buffer: &mut TextBuffer) -> std::io::Result<()> {
        queue!(out, Print(buffer.to_raw_string()), Print("\n"))?;
        out.flush()
    }
}
