//! Theme loading with I/O abstraction.
//!
//! This module provides the `ThemeLoader` trait for loading themes from various sources,
//! and `LocalThemeLoader` as the default filesystem-based implementation.

use std::path::{Path, PathBuf};

use super::types::{Theme, BUILTIN_THEMES};
use super::ThemeError;

/// Trait for loading theme files from various sources.
///
/// Implementations only fetch JSON text; parsing and validation happen in
/// [`Theme::load`].
pub trait ThemeLoader: Send + Sync {
    /// Load theme JSON content by name.
    /// Returns None if theme doesn't exist.
    fn load_theme(&self, name: &str) -> Option<String>;

    /// List all available theme names from this loader.
    fn available_themes(&self) -> Vec<String>;

    /// Check if a theme exists by name.
    fn theme_exists(&self, name: &str) -> bool {
        self.load_theme(name).is_some()
    }
}

/// Default implementation using local filesystem.
///
/// Searches for `<name>.json` in:
/// 1. User themes directory (`<config_dir>/ddk-theme/themes/`)
/// 2. `themes/` relative to the working directory
pub struct LocalThemeLoader {
    user_themes_dir: Option<PathBuf>,
}

impl LocalThemeLoader {
    /// Create a new LocalThemeLoader with default directories.
    pub fn new() -> Self {
        Self {
            user_themes_dir: default_user_themes_dir(),
        }
    }

    /// Create a LocalThemeLoader with a custom user themes directory.
    pub fn with_user_dir(user_themes_dir: Option<PathBuf>) -> Self {
        Self { user_themes_dir }
    }

    pub fn user_themes_dir(&self) -> Option<&Path> {
        self.user_themes_dir.as_deref()
    }

    fn theme_paths(&self, name: &str) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if !is_valid_theme_name(name) {
            return paths;
        }

        let file_name = format!("{name}.json");
        if let Some(ref user_dir) = self.user_themes_dir {
            paths.push(user_dir.join(&file_name));
        }
        paths.push(Path::new("themes").join(&file_name));

        paths
    }
}

impl Default for LocalThemeLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// `<config_dir>/ddk-theme/themes`, if the platform has a config directory.
pub fn default_user_themes_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ddk-theme").join("themes"))
}

/// Names of `*.json` files in `dir`, sorted. Missing directories yield nothing.
fn scan_dir(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect();
    names.sort();
    names
}

impl ThemeLoader for LocalThemeLoader {
    fn load_theme(&self, name: &str) -> Option<String> {
        self.theme_paths(name).into_iter().find_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            tracing::debug!(path = %path.display(), "found theme file");
            Some(content)
        })
    }

    fn available_themes(&self) -> Vec<String> {
        let mut themes = Vec::new();

        if let Some(ref user_dir) = self.user_themes_dir {
            themes.extend(scan_dir(user_dir));
        }
        for name in scan_dir(Path::new("themes")) {
            if !themes.contains(&name) {
                themes.push(name);
            }
        }

        themes
    }
}

/// Lowercase and dash-separated, so `Land_Cover` finds `land-cover`.
pub fn normalize_theme_name(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

/// A theme name must stay a plain file stem inside the themes directory.
pub fn is_valid_theme_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains(['/', '\\', ':', '\0'])
}

// Extension methods on Theme that use ThemeLoader
impl Theme {
    /// Load and parse a theme JSON file. Does not validate value domains.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load theme by name using a ThemeLoader.
    ///
    /// Builtin themes win over loader themes with the same name. Themes from
    /// the loader are validated before being returned.
    pub fn load(name: &str, loader: &dyn ThemeLoader) -> Result<Self, ThemeError> {
        let normalized = normalize_theme_name(name);
        if !is_valid_theme_name(&normalized) {
            return Err(ThemeError::InvalidName(name.to_string()));
        }

        if let Some(theme) = Self::load_builtin(&normalized) {
            return Ok(theme);
        }

        let json = loader
            .load_theme(&normalized)
            .ok_or_else(|| ThemeError::NotFound(normalized.clone()))?;
        let theme = Self::from_json(&json)?;

        if let Err(e) = theme.validate() {
            tracing::warn!(
                theme = %normalized,
                issues = e.issues().len(),
                "rejecting invalid theme"
            );
            return Err(e);
        }

        tracing::debug!(theme = %normalized, "loaded theme");
        Ok(theme)
    }

    /// Get all available themes (builtin + from loader).
    pub fn all_available(loader: &dyn ThemeLoader) -> Vec<String> {
        let mut themes: Vec<String> = BUILTIN_THEMES.iter().map(|t| t.name.to_string()).collect();

        for name in loader.available_themes() {
            if !themes.contains(&name) {
                themes.push(name);
            }
        }

        themes
    }
}
