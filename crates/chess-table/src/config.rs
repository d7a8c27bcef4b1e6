//! Configuration file loading for the chess table.
//!
//! Settings are read from `table.toml` in the current directory unless a
//! path is given on the command line. A missing default file is not an
//! error; every key falls back to its default.

use std::path::{Path, PathBuf};

use chess_core::Promotion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How pieces are drawn.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Glyphs {
    /// FEN letters, uppercase for White.
    #[default]
    Ascii,
    /// Unicode chess symbols.
    Unicode,
}

/// Table settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TableConfig {
    #[serde(default)]
    pub glyphs: Glyphs,
    /// Mark the legal targets of the selected piece. Defaults to true.
    #[serde(default = "default_show_highlights")]
    pub show_highlights: bool,
    /// Promotion used when a move names none. Defaults to queen.
    #[serde(default)]
    pub promotion: Promotion,
    /// Print each event as a JSON line.
    #[serde(default)]
    pub echo_events: bool,
}

fn default_show_highlights() -> bool {
    true
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            glyphs: Glyphs::default(),
            show_highlights: default_show_highlights(),
            promotion: Promotion::default(),
            echo_events: false,
        }
    }
}

impl TableConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Self::config_path()`] is read if present and defaults are used
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", default.display());
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default configuration path: `table.toml` in the current
    /// working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("table.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TableConfig::parse(
            r#"
glyphs = "unicode"
show_highlights = false
promotion = "knight"
echo_events = true
"#,
        )
        .unwrap();
        assert_eq!(config.glyphs, Glyphs::Unicode);
        assert!(!config.show_highlights);
        assert_eq!(config.promotion, Promotion::Knight);
        assert!(config.echo_events);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TableConfig::parse("").unwrap();
        assert_eq!(config, TableConfig::default());
        assert!(config.show_highlights);
        assert_eq!(config.promotion, Promotion::Queen);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            TableConfig::parse(r#"glyphs = "emoji""#),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            TableConfig::parse(r#"promotion = "king""#),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = TableConfig::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("exist.toml"));
    }

    #[test]
    fn test_shipped_config_parses() {
        let shipped = include_str!("../table.toml");
        assert_eq!(TableConfig::parse(shipped).unwrap(), TableConfig::default());
    }
}
