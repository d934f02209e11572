use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single problem found while validating a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted key path, e.g. `card_border.color` or `colorway[3]`
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theme: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to serialize theme: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("theme `{0}` not found")]
    NotFound(String),

    #[error("invalid theme name `{0}`")]
    InvalidName(String),

    #[error("theme has {} invalid value(s):\n{}", .0.len(), format_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

impl ThemeError {
    /// Validation issues, if this error came from validation.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ThemeError::Invalid(issues) => issues,
            _ => &[],
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}
