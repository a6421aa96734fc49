//! Configuration management.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `PLACEBOOK_*` environment variables.
//!
//! ```toml
//! data_dir = "/home/me/.local/share/placebook"
//! export_dir = "/home/me/Documents"
//! csv_dialect = "standard"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! file = "/tmp/placebook.log"
//! ```

use crate::io::CsvDialect;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "PLACEBOOK_DATA_DIR";
/// Environment variable overriding the export directory.
pub const ENV_EXPORT_DIR: &str = "PLACEBOOK_EXPORT_DIR";
/// Environment variable overriding the CSV dialect.
pub const ENV_CSV_DIALECT: &str = "PLACEBOOK_CSV_DIALECT";

const APP_DIR: &str = "placebook";
const CONFIG_FILE: &str = "config.toml";

/// Main configuration for placebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacebookConfig {
    /// Directory holding the persisted record collection.
    pub data_dir: PathBuf,
    /// Directory exports are written to. Defaults to `<data_dir>/exports`.
    pub export_dir: Option<PathBuf>,
    /// CSV dialect used for export and import.
    pub csv_dialect: CsvDialect,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `placebook=debug`.
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Export directory.
    pub export_dir: Option<String>,
    /// CSV dialect name.
    pub csv_dialect: Option<String>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for PlacebookConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            export_dir: None,
            csv_dialect: CsvDialect::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl PlacebookConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or names an
    /// unknown CSV dialect.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid config TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/placebook/` on macOS)
    /// 2. XDG config dir (`~/.config/placebook/`)
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join(APP_DIR).join(CONFIG_FILE),
            base_dirs
                .home_dir()
                .join(".config")
                .join(APP_DIR)
                .join(CONFIG_FILE),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Loaded config file");
                    return config;
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                },
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `PlacebookConfig`.
    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(export_dir) = file.export_dir {
            config.export_dir = Some(PathBuf::from(export_dir));
        }
        if let Some(dialect) = file.csv_dialect {
            config.csv_dialect = dialect.parse()?;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        Ok(config)
    }

    /// Applies `PLACEBOOK_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `PLACEBOOK_CSV_DIALECT` is unknown.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the dialect value is unknown.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_EXPORT_DIR) {
            self.export_dir = Some(PathBuf::from(dir));
        }
        if let Some(dialect) = get(ENV_CSV_DIALECT) {
            self.csv_dialect = dialect.parse()?;
        }

        Ok(())
    }

    /// Returns the directory exports are written to.
    #[must_use]
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("exports"))
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the export directory.
    #[must_use]
    pub fn with_export_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(path.into());
        self
    }

    /// Sets the CSV dialect.
    #[must_use]
    pub const fn with_csv_dialect(mut self, dialect: CsvDialect) -> Self {
        self.csv_dialect = dialect;
        self
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_DIR)
        .map_or_else(|| PathBuf::from(".placebook"), |dirs| dirs.data_dir().to_path_buf())
}
