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

use crate::error::ConfigError;
use serde::Deserialize;

/// Tunables for the editing engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// How many lines the indent detector looks at
    pub indent_scan_limit: usize,
    /// Width a tab indent unit counts as when computing indent levels
    pub tab_indent_width: usize,
    /// Replace operator spellings such as `>=` with symbols in fragments
    pub substitute_symbols: bool,
    /// Glyph repeated once per indent level in the indentation marker
    pub indent_marker: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indent_scan_limit: 1024,
            tab_indent_width: 2,
            substitute_symbols: true,
            indent_marker: '-',
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(source)?;
        if config.tab_indent_width == 0 {
            return Err(ConfigError::Invalid(
                "tab_indent_width must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.indent_scan_limit, 1024);
        assert_eq!(config.tab_indent_width, 2);
        assert!(config.substitute_symbols);
        assert_eq!(config.indent_marker, '-');
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("tab_indent_width = 4\n").unwrap();
        assert_eq!(config.tab_indent_width, 4);
        assert_eq!(config.indent_scan_limit, 1024);

        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(
            EngineConfig::from_toml_str("tab_indent_width = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("no_such_option = true"),
            Err(ConfigError::Parse(_))
        ));
        assert!(EngineConfig::from_toml_str("indent_marker = \"ab\"").is_err());
    }
}
