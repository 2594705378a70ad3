use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("Failed to write config file at {config_path}: {source}")]
    ConfigWriteError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: {value} (must be at least 1)")]
    InvalidValue { field: &'static str, value: usize },
}

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Columns a tab advances to the next multiple of.
    pub tab_width: usize,
    /// Trailing spaces that turn a line end into a hard break.
    pub hard_break_spaces: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            hard_break_spaces: 2,
        }
    }
}

/// On-disk layout: options live under a `[parse]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    parse: ParseOptions,
}

impl ParseOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tab_width",
                value: self.tab_width,
            });
        }
        if self.hard_break_spaces == 0 {
            return Err(ConfigError::InvalidValue {
                field: "hard_break_spaces",
                value: self.hard_break_spaces,
            });
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ConfigFile>(content).map(|file| file.parse)
    }

    /// Loads options from a TOML file. A missing file is not an error.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            log::debug!("no parse config at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let options =
            Self::from_toml_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        options.validate()?;

        Ok(Some(options))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), ConfigError> {
        let config_path = config_path.as_ref();
        let write_error = |source| ConfigError::ConfigWriteError {
            config_path: config_path.to_path_buf(),
            source,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(&ConfigFile { parse: *self })?;
        std::fs::write(config_path, content).map_err(write_error)?;
        Ok(())
    }
}
