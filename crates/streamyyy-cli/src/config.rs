//! TOML configuration for the `streamyyy-grid` command.
//!
//! Reads and writes [`LayoutConfig`] from the platform-appropriate file:
//! - Windows:  `%APPDATA%\Streamyyy\layout.toml`
//! - Linux:    `$XDG_CONFIG_HOME/streamyyy/layout.toml` (or `~/.config/streamyyy/layout.toml`)
//! - macOS:    `~/Library/Application Support/Streamyyy/layout.toml`
//!
//! Every field is optional.  A file that only names the values it changes is
//! enough:
//!
//! ```toml
//! log_level = "debug"
//!
//! [grid]
//! max_streams = 6
//! min_cell_width = 160.0
//!
//! [grid.preferences]
//! phone_compact = 1.5
//!
//! [spacing]
//! tablet = 1.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use streamyyy_core::{GridOptions, SpacingScale};

/// File name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "layout.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Layout settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub grid: GridOptions,
    #[serde(default)]
    pub spacing: SpacingScale,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            grid: GridOptions::default(),
            spacing: SpacingScale::default(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the base directory cannot
/// be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration.
///
/// With `Some(path)` the file must exist.  With `None` the platform default
/// location is used and a missing file yields [`LayoutConfig::default()`], as
/// does a platform with no config directory at all.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig, ConfigError> {
    let (path, required) = match path {
        Some(explicit) => (explicit.to_path_buf(), true),
        None => match platform_config_dir() {
            Some(dir) => (dir.join(CONFIG_FILE_NAME), false),
            None => return Ok(LayoutConfig::default()),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            Ok(LayoutConfig::default())
        }
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Parses TOML text into a [`LayoutConfig`].
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed or a value has the
/// wrong type.
pub fn parse_config(content: &str) -> Result<LayoutConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &LayoutConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory including the `Streamyyy` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Streamyyy"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Streamyyy")
        })
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("streamyyy"))
    }

    #[cfg(not(any(target_os = "windows", unix)))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
