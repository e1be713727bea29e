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

mod operation;
mod view;

use anyhow::Context;
use blox_core::syntax::{install_when_ready, TokenTreeLoader};
use blox_core::{EngineConfig, ParserSlot, TextBuffer, Tokenizer};
use clap::Parser;
use operation::Operation;
use slotmap::{new_key_type, SlotMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use view::{BlockView, RawView, View};

new_key_type! {
    struct DocumentId;
}

/// Blox - a block-style code editor
#[derive(Debug, Parser)]
#[command(name = "blox", version, about)]
struct Cli {
    /// Files to open. Missing files open as empty buffers.
    files: Vec<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File type; starts the syntax parser for it in the background
    #[arg(short = 't', long = "type")]
    kind: Option<String>,

    /// Operation to apply to the first document, in order. One of
    /// insert:TEXT, delete:N, move:LINE:COL, select:L:C:L:C, indent, outdent
    #[arg(short = 'e', long = "op")]
    ops: Vec<Operation>,

    /// Show the raw text instead of the block view
    #[arg(long)]
    raw: bool,

    /// Number the lines in the block view
    #[arg(short = 'n', long)]
    line_numbers: bool,

    /// Wait for the syntax parser and report what it found
    #[arg(long)]
    parse: bool,
}

struct Document {
    buffer: TextBuffer,
    parser_task: Option<JoinHandle<bool>>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("BLOX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let source = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
}

async fn open_document(path: &Path, config: &EngineConfig) -> anyhow::Result<TextBuffer> {
    let name = path.display().to_string();
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(file = %name, "file not found, starting empty");
            String::new()
        }
        Err(e) => return Err(e).with_context(|| format!("reading {name}")),
    };

    let mut buffer = TextBuffer::with_config(config.clone());
    buffer.load_content(&name, &text);
    Ok(buffer)
}

/// Hook a not-yet-ready parser up to `buffer` and start loading it.
fn start_parser(buffer: &mut TextBuffer, kind: &str, config: &EngineConfig) -> JoinHandle<bool> {
    buffer.set_type(kind);
    let (slot, installer) = ParserSlot::pending();
    buffer.attach_parser(slot);

    let loader = TokenTreeLoader::new(Tokenizer::new(
        config.tab_indent_width,
        config.substitute_symbols,
    ));
    let kind = kind.to_string();
    tokio::spawn(async move { install_when_ready(&loader, &kind, installer).await })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).await?;

    let mut documents: SlotMap<DocumentId, Document> = SlotMap::with_key();
    let mut order = Vec::new();

    if cli.files.is_empty() {
        let mut buffer = TextBuffer::with_config(config.clone());
        buffer.load_content("*scratch*", "");
        order.push(documents.insert(Document {
            buffer,
            parser_task: None,
        }));
    }
    for path in &cli.files {
        let buffer = open_document(path, &config).await?;
        order.push(documents.insert(Document {
            buffer,
            parser_task: None,
        }));
    }

    if let Some(kind) = &cli.kind {
        for document in documents.values_mut() {
            document.parser_task = Some(start_parser(&mut document.buffer, kind, &config));
        }
    }

    // Operations go to the first document
    if let Some(active) = order.first().and_then(|id| documents.get_mut(*id)) {
        for op in &cli.ops {
            op.apply(&mut active.buffer)
                .with_context(|| format!("applying {op:?} to {}", active.buffer.name()))?;
        }
    }

    let mut stdout = std::io::stdout().lock();
    let mut block_view = BlockView {
        show_line_numbers: cli.line_numbers,
    };
    for (i, id) in order.iter().enumerate() {
        let document = &mut documents[*id];
        if order.len() > 1 {
            if i > 0 {
                writeln!(stdout)?;
            }
            writeln!(stdout, "== {} ==", document.buffer.name())?;
        }
        if cli.raw {
            RawView.draw(&mut stdout, &mut document.buffer)?;
        } else {
            block_view.draw(&mut stdout, &mut document.buffer)?;
        }
    }

    if cli.parse {
        for id in &order {
            let document = &mut documents[*id];
            if let Some(task) = document.parser_task.take() {
                task.await.context("syntax parser task panicked")?;
            }
            match document.buffer.try_parse() {
                Some(tree) => info!(
                    document = document.buffer.name(),
                    nodes = tree.node_count(),
                    "parsed"
                ),
                None => warn!(document = document.buffer.name(), "no parse available"),
            }
        }
    }

    Ok(())
}
