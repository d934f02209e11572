pub mod tracing;

use std::path::Path;

use ddk_theme::Theme;

/// Write the builtin theme to `<dir>/<name>.json` with one top-level key replaced.
pub fn write_theme_variant(dir: &Path, name: &str, key: &str, value: serde_json::Value) {
    let mut json = Theme::builtin().to_json_value().unwrap();
    json[key] = value;
    std::fs::write(
        dir.join(format!("{name}.json")),
        serde_json::to_string_pretty(&json).unwrap(),
    )
    .unwrap();
}
