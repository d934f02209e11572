//! Theme module with separated pure types and I/O operations.
//!
//! This module is split into:
//! - `types`: The `Theme` record and its value types (no filesystem access)
//! - `validate`: Value-domain checks
//! - `lookup`: Key-path access by serialized name
//! - `loader`: I/O operations with `ThemeLoader` trait abstraction
//!
//! # Example
//!
//! ```
//! use ddk_theme::theme::{LocalThemeLoader, Theme};
//!
//! // Builtin theme (no I/O, parsed once)
//! let theme = Theme::builtin();
//! assert_eq!(theme.accent, "#2186f4");
//! assert_eq!(theme.lookup("colorway[0]"), Some(serde_json::json!("#119dff")));
//!
//! // Load by name, falling back to user theme files
//! let loader = LocalThemeLoader::new();
//! let same = Theme::load("land-cover", &loader).unwrap();
//! assert_eq!(&same, theme);
//! ```

mod error;
mod loader;
mod lookup;
mod types;
mod validate;

pub use error::*;
pub use loader::*;
pub use types::*;
