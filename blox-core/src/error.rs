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

use thiserror::Error;

/// Caller contract violations. Everything else in the engine clamps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("line {line} is out of bounds (buffer has {line_count} lines)")]
    LineOutOfBounds { line: usize, line_count: usize },

    #[error("column {col} is out of bounds on line {line} (length {len})")]
    ColumnOutOfBounds { line: usize, col: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid engine configuration: {0}")]
    Invalid(String),
}

/// Why a syntax parser could not be brought up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserLoadError {
    #[error("no parser available for file type '{0}'")]
    Unsupported(String),

    #[error("parser failed to initialize: {0}")]
    Failed(String),
}
