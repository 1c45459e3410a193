//! Configuration file support
//!
//! Loads settings from ~/.sidepy.toml (or %USERPROFILE%\.sidepy.toml on Windows)
//!
//! Example:
//! ```text
//! # sidepy configuration
//! interpreter = "python3"
//! line_numbers = true
//! bracket_palette = ["#ffd700", "#da70d6", "#87ceeb", "#98fb98"]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SidepyError};
use crate::exec::DEFAULT_INTERPRETER;
use crate::syntax::{BracketPalette, Color};

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Interpreter command used to run scripts
    pub interpreter: String,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Colors cycled by bracket depth
    pub bracket_palette: BracketPalette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            show_line_numbers: false,
            bracket_palette: BracketPalette::default(),
        }
    }
}

/// On-disk layout; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    interpreter: Option<String>,
    line_numbers: Option<bool>,
    bracket_palette: Option<Vec<String>>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".sidepy.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".sidepy.toml"))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply(raw)?;
        Ok(config)
    }

    /// Apply settings from parsed config
    fn apply(&mut self, raw: RawConfig) -> Result<()> {
        if let Some(interpreter) = raw.interpreter {
            let interpreter = interpreter.trim();
            if interpreter.is_empty() {
                return Err(SidepyError::Config("interpreter must not be empty".into()));
            }
            self.interpreter = interpreter.to_string();
        }

        if let Some(value) = raw.line_numbers {
            self.show_line_numbers = value;
        }

        if let Some(hexes) = raw.bracket_palette {
            let colors = hexes
                .iter()
                .map(|hex| {
                    Color::from_hex(hex).ok_or_else(|| {
                        SidepyError::Config(format!("invalid color '{}' (expected #rrggbb)", hex))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            self.bracket_palette = BracketPalette::new(colors)
                .ok_or_else(|| SidepyError::Config("bracket_palette must not be empty".into()))?;
        }

        Ok(())
    }
}
