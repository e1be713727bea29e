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

//! Optional syntax-aware parser collaborator.
//!
//! A real parser (tree-sitter or similar) may take a while to come up, so the
//! engine only ever sees a [`ParserSlot`]: a capability that starts out
//! not-ready and is filled in from outside, typically by a background task
//! running [`install_when_ready`]. Asking a slot that is not ready yet gives
//! the same answer as having no parser at all. Nothing on the editing path
//! waits on it.

use crate::error::ParserLoadError;
use crate::position::{Position, TextRange};
use crate::tokenizer::Tokenizer;
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// A node in a parse tree, in buffer coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: String,
    pub range: TextRange,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: &str, range: TextRange) -> Self {
        Self {
            kind: kind.to_string(),
            range,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

pub trait SyntaxParser: Send + Sync {
    /// Parse the whole document. `None` means the parser had nothing to say.
    fn parse(&self, source: &str) -> Option<SyntaxNode>;
}

/// Brings up a parser for a file type, possibly slowly.
#[async_trait]
pub trait ParserLoader: Send + Sync {
    async fn load(&self, kind: &str) -> Result<Box<dyn SyntaxParser>, ParserLoadError>;
}

type SharedParser = Arc<OnceLock<Box<dyn SyntaxParser>>>;

/// Read side of a parser that may or may not be ready.
#[derive(Clone, Default)]
pub struct ParserSlot {
    parser: SharedParser,
}

impl fmt::Debug for ParserSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserSlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Write side of a [`ParserSlot`]. Consumed by the first install.
pub struct ParserInstaller {
    parser: SharedParser,
}

impl ParserSlot {
    /// A not-ready slot plus the handle that will fill it
    pub fn pending() -> (ParserSlot, ParserInstaller) {
        let parser: SharedParser = Arc::new(OnceLock::new());
        (
            ParserSlot {
                parser: parser.clone(),
            },
            ParserInstaller { parser },
        )
    }

    /// A slot that is ready from the start
    pub fn ready(parser: Box<dyn SyntaxParser>) -> ParserSlot {
        let (slot, installer) = Self::pending();
        installer.install(parser);
        slot
    }

    pub fn is_ready(&self) -> bool {
        self.parser.get().is_some()
    }

    /// Parse if a parser is installed; otherwise `None` without waiting.
    pub fn try_parse(&self, source: &str) -> Option<SyntaxNode> {
        self.parser.get()?.parse(source)
    }
}

impl ParserInstaller {
    /// Returns false if the slot was somehow already filled.
    pub fn install(self, parser: Box<dyn SyntaxParser>) -> bool {
        self.parser.set(parser).is_ok()
    }
}

/// Load a parser for `kind` and install it into the slot behind `installer`.
/// A failed load is logged and leaves the slot not-ready for good.
pub async fn install_when_ready(
    loader: &dyn ParserLoader,
    kind: &str,
    installer: ParserInstaller,
) -> bool {
    match loader.load(kind).await {
        Ok(parser) => {
            let installed = installer.install(parser);
            debug!(kind, installed, "syntax parser ready");
            installed
        }
        Err(e) => {
            warn!(kind, error = %e, "syntax parser unavailable");
            false
        }
    }
}

/// Parser that builds a flat document/line/token tree from the tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenTreeParser {
    tokenizer: Tokenizer,
}

impl TokenTreeParser {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }
}

impl SyntaxParser for TokenTreeParser {
    fn parse(&self, source: &str) -> Option<SyntaxNode> {
        let mut end = Position::ZERO;
        let mut lines = Vec::new();

        for (index, text) in source.split('\n').enumerate() {
            let len = text.chars().count();
            end = Position::new(index, len);

            let mut line = SyntaxNode::new("line", TextRange::on_line(index, 0, len));
            line.children = self
                .tokenizer
                .split_line(index, text)
                .into_iter()
                .map(|range| SyntaxNode::new("token", range))
                .collect();
            lines.push(line);
        }

        let mut document = SyntaxNode::new("document", TextRange::new(Position::ZERO, end));
        document.children = lines;
        Some(document)
    }
}

/// Loader for [`TokenTreeParser`]; works for every file type.
#[derive(Debug, Clone, Default)]
pub struct TokenTreeLoader {
    tokenizer: Tokenizer,
}

impl TokenTreeLoader {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }
}

#[async_trait]
impl ParserLoader for TokenTreeLoader {
    async fn load(&self, _kind: &str) -> Result<Box<dyn SyntaxParser>, ParserLoadError> {
        Ok(Box::new(TokenTreeParser::new(self.tokenizer.clone())))
    }
}
