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

//! Editing engine for a block-style code editor.
//!
//! The engine keeps the document as an array of lines, each tagged with a
//! permanent [`LineId`], tracks a single selection/caret, infers the
//! document's indent unit and produces per-line display fragments that the
//! UI layer shows as clickable token blocks.

pub mod buffer;
pub mod config;
pub mod error;
pub mod indent;
pub mod position;
pub mod render;
pub mod syntax;
pub mod tokenizer;

pub use buffer::{LineId, TextBuffer};
pub use config::EngineConfig;
pub use error::{ConfigError, EditError, ParserLoadError};
pub use indent::{detect_indent, IndentUnit};
pub use position::{Position, TextRange};
pub use render::{FragmentElement, LineFragment, RenderSlot, TokenAction, TokenElement};
pub use syntax::{ParserInstaller, ParserLoader, ParserSlot, SyntaxNode, SyntaxParser};
pub use tokenizer::{CharClass, Tokenizer};
