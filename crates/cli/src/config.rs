//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use datespeak_core::OutputMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# Datespeak configuration
# See: datespeak --help for all options

# Output mode: "single" (one canonical reading) or "multi" (every reading)
mode = "single"

# Directory with replacement table files (same layout as the built-in data/)
# tables = "/path/to/tables"

# Disable colored output
no_color = false
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Option<OutputMode>,
    pub tables: Option<PathBuf>,
    pub no_color: Option<bool>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux: `~/.config/datespeak/config.toml`
    /// - macOS: `~/Library/Application Support/datespeak/config.toml`
    /// - Windows: `%APPDATA%\datespeak\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("datespeak").join("config.toml"))
    }

    /// Load config from the standard location. Returns default if the file doesn't exist.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`, warning on parse errors.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get mode with precedence: env > config > default.
    pub fn mode(&self) -> OutputMode {
        Self::env_var("DATESPEAK_MODE")
            .or(self.mode)
            .unwrap_or_default()
    }

    /// Get the table directory with precedence: env > config.
    pub fn tables(&self) -> Option<PathBuf> {
        std::env::var_os("DATESPEAK_TABLES")
            .map(PathBuf::from)
            .or_else(|| self.tables.clone())
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("DATESPEAK_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))
}
