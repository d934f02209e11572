use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::ExportFormat;
use crate::theme::DEFAULT_THEME_NAME;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Name of the theme to load
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Extra directory searched for `<name>.json` theme files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes_dir: Option<PathBuf>,

    #[serde(default)]
    pub export: ExportConfig,
}

fn default_theme_name() -> String {
    DEFAULT_THEME_NAME.to_string()
}

/// How the theme asset is written for the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,

    /// Global the JS asset assigns to (`window.<global_name>`)
    #[serde(default = "default_global_name")]
    pub global_name: String,

    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_global_name() -> String {
    "theme".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            global_name: default_global_name(),
            pretty: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            themes_dir: None,
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// `<config_dir>/ddk-theme/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ddk-theme").join("config.json"))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicitly given file, or the default file when it exists.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load_from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme name cannot be empty".to_string(),
            ));
        }

        if !is_js_identifier(&self.export.global_name) {
            return Err(ConfigError::Validation(format!(
                "export.global_name `{}` is not a valid JavaScript identifier",
                self.export.global_name
            )));
        }

        Ok(())
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
