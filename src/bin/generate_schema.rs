//! Generate JSON Schema for theme and configuration files
//!
//! This binary generates a JSON Schema from the Theme or Config struct using
//! schemars. Editors use it to validate and complete user files.
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > themes/theme-schema.json
//!   cargo run --features dev-bins --bin generate_schema -- config > config-schema.json

use ddk_theme::config::Config;
use ddk_theme::Theme;
use schemars::schema_for;

fn main() {
    let target = std::env::args().nth(1).unwrap_or_else(|| "theme".to_string());

    let json = match target.as_str() {
        "theme" => {
            let mut json: serde_json::Value =
                serde_json::to_value(schema_for!(Theme)).expect("Failed to serialize schema");

            // Point users at the builtin theme as a starting example
            if let Some(obj) = json.as_object_mut() {
                let example =
                    serde_json::to_value(Theme::builtin()).expect("Failed to serialize theme");
                obj.insert("examples".to_string(), serde_json::Value::Array(vec![example]));
            }
            json
        }
        "config" => serde_json::to_value(schema_for!(Config)).expect("Failed to serialize schema"),
        other => {
            eprintln!("unknown schema `{other}` (expected theme or config)");
            std::process::exit(2);
        }
    };

    let output = serde_json::to_string_pretty(&json).expect("Failed to serialize schema");
    println!("{}", output);
}
