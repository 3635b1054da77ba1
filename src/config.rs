use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::query::PatternOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// File extensions picked up when a directory is given
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Extra spelling for "match any heading" (`.*` and `*` always work)
    #[serde(default = "default_wildcard")]
    pub wildcard: String,

    /// Match path patterns literally instead of as regular expressions
    #[serde(default)]
    pub fixed_strings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "report", "tree" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            wildcard: default_wildcard(),
            fixed_strings: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

fn default_wildcard() -> String {
    ".*".to_string()
}

fn default_format() -> String {
    "report".to_string()
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/mdsection/config.toml
    /// - Linux: ~/.config/mdsection/config.toml
    /// - Windows: %APPDATA%/mdsection/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mdsection").join("config.toml"))
    }

    /// Load config from the platform path, or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`; a missing or malformed file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
        };
        toml::from_str(&contents).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "ignoring malformed config");
            Self::default()
        })
    }

    /// Pattern options derived from the `[query]` table
    pub fn pattern_options(&self) -> PatternOptions {
        PatternOptions {
            wildcard: self.query.wildcard.clone(),
            fixed_strings: self.query.fixed_strings,
        }
    }
}
