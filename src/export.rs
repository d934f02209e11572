//! Render a theme as the asset the browser loads.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ExportConfig;
use crate::theme::{Theme, ThemeError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `window.<global> = {...};`
    #[default]
    Js,
    /// Plain JSON document
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Js => "js",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(ExportFormat::Js),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format `{other}` (expected js or json)")),
        }
    }
}

/// Render `theme` according to `config`. Keys keep declaration order.
pub fn render(theme: &Theme, config: &ExportConfig) -> Result<String, ThemeError> {
    let json = if config.pretty {
        serde_json::to_string_pretty(theme)
    } else {
        serde_json::to_string(theme)
    }
    .map_err(ThemeError::Serialize)?;

    Ok(match config.format {
        ExportFormat::Json => format!("{json}\n"),
        ExportFormat::Js => format!("window.{} = {};\n", config.global_name, json),
    })
}

/// Render and write the asset, creating parent directories as needed.
pub fn write_asset(theme: &Theme, config: &ExportConfig, path: &Path) -> Result<(), ThemeError> {
    let rendered = render(theme, config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ThemeError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, &rendered).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        format = %config.format,
        bytes = rendered.len(),
        "wrote theme asset"
    );
    Ok(())
}
