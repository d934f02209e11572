use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, Subcommand};
use ddk_theme::config::Config;
use ddk_theme::export::{self, ExportFormat};
use ddk_theme::theme::{default_user_themes_dir, normalize_theme_name, LocalThemeLoader, Theme};
use tracing_subscriber::EnvFilter;

/// Inspect, validate and export dashboard themes
#[derive(Parser, Debug)]
#[command(name = "ddk-theme")]
#[command(about = "Inspect, validate and export dashboard themes", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Theme to use, overriding the configuration file
    #[arg(long, value_name = "NAME", global = true)]
    theme: Option<String>,

    /// Directory searched for <NAME>.json theme files
    #[arg(long, value_name = "DIR", global = true)]
    themes_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set (e.g. 'debug', 'ddk_theme=trace')
    #[arg(long, value_name = "FILTER", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the theme as a browser asset or JSON
    Show {
        /// Output format: js or json (default from config)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print one value, e.g. `accent`, `colorway[0]` or `border_style.borderWidth`
    Get { key: String },

    /// List the theme's top-level keys
    Keys,

    /// Validate a theme file, or the selected theme when no file is given
    Validate { file: Option<PathBuf> },

    /// List builtin and user themes
    List,

    /// Write the theme asset to a file
    Export {
        #[arg(long, short, value_name = "PATH")]
        out: PathBuf,

        /// Output format: js or json (default from config)
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Print the directories used for configuration and user themes
    Paths,

    /// Interpolate the colorscale at a position between 0 and 1
    Sample {
        #[arg(allow_negative_numbers = true)]
        position: f64,
    },

    /// Print the colorway color assigned to each of the first COUNT series
    Series { count: usize },
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // stdout carries command output, diagnostics go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn loader_for(config: &Config) -> LocalThemeLoader {
    LocalThemeLoader::with_user_dir(config.themes_dir.clone().or_else(default_user_themes_dir))
}

fn load_theme(config: &Config) -> AnyhowResult<Theme> {
    Theme::load(&config.theme, &loader_for(config))
        .with_context(|| format!("Failed to load theme '{}'", config.theme))
}

fn print_value(out: &mut impl Write, value: &serde_json::Value) -> AnyhowResult<()> {
    match value {
        serde_json::Value::String(s) => writeln!(out, "{s}")?,
        other => writeln!(out, "{}", serde_json::to_string_pretty(other)?)?,
    }
    Ok(())
}

fn validate_file(out: &mut impl Write, path: &Path) -> AnyhowResult<()> {
    let theme = Theme::from_file(path)?;
    theme
        .validate()
        .with_context(|| format!("{} is not a valid theme", path.display()))?;
    writeln!(out, "{}: ok", path.display())?;
    Ok(())
}

fn run(command: Command, config: &Config, out: &mut impl Write) -> AnyhowResult<()> {
    match command {
        Command::Show { format, compact } => {
            let mut export_config = config.export.clone();
            if let Some(format) = format {
                export_config.format = format;
            }
            export_config.pretty = export_config.pretty && !compact;
            write!(out, "{}", export::render(&load_theme(config)?, &export_config)?)?;
        }
        Command::Get { key } => {
            let theme = load_theme(config)?;
            let value = theme
                .lookup(&key)
                .with_context(|| format!("Theme has no value at '{key}'"))?;
            print_value(out, &value)?;
        }
        Command::Keys => {
            for key in load_theme(config)?.keys() {
                writeln!(out, "{key}")?;
            }
        }
        Command::Validate { file: Some(path) } => validate_file(out, &path)?,
        Command::Validate { file: None } => {
            let theme = load_theme(config)?;
            theme.validate()?;
            writeln!(out, "{}: ok", config.theme)?;
        }
        Command::List => {
            let selected = normalize_theme_name(&config.theme);
            for name in Theme::all_available(&loader_for(config)) {
                let marker = if name == selected { "*" } else { " " };
                writeln!(out, "{marker} {name}")?;
            }
        }
        Command::Export { out: path, format } => {
            let mut export_config = config.export.clone();
            if let Some(format) = format {
                export_config.format = format;
            }
            export::write_asset(&load_theme(config)?, &export_config, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Paths => {
            let show = |p: Option<PathBuf>| {
                p.map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(unavailable)".to_string())
            };
            writeln!(out, "config: {}", show(Config::default_path()))?;
            writeln!(
                out,
                "themes: {}",
                show(config.themes_dir.clone().or_else(default_user_themes_dir))
            )?;
        }
        Command::Sample { position } => {
            let color = load_theme(config)?
                .colorscale
                .sample(position)
                .context("Colorscale is empty or has an invalid stop")?;
            writeln!(out, "{color}")?;
        }
        Command::Series { count } => {
            let theme = load_theme(config)?;
            for i in 0..count {
                if let Some(color) = theme.colorway.color_for_series(i) {
                    writeln!(out, "{i}\t{color}")?;
                }
            }
        }
    }
    Ok(())
}

/// Config file values, overridden by command-line flags.
fn resolve_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    if let Some(dir) = &args.themes_dir {
        config.themes_dir = Some(dir.clone());
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = resolve_config(&args)?;
    tracing::debug!(theme = %config.theme, "resolved configuration");

    let stdout = io::stdout();
    run(args.command, &config, &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddk_theme::config::ExportConfig;

    fn run_to_string(command: Command, config: &Config) -> AnyhowResult<String> {
        let mut out = Vec::new();
        run(command, config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ddk-theme").chain(argv.iter().copied())).unwrap()
    }

    fn write_config(dir: &Path, theme: &str) -> PathBuf {
        let path = dir.join("config.json");
        let config = Config {
            theme: theme.to_string(),
            themes_dir: Some(dir.join("themes")),
            export: ExportConfig::default(),
        };
        config.save_to_file(&path).unwrap();
        path
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = parse(&["get", "accent", "--theme", "ocean", "--log-level", "debug"]);
        assert_eq!(args.theme.as_deref(), Some("ocean"));
        assert_eq!(args.log_level, "debug");
        assert!(matches!(args.command, Command::Get { ref key } if key == "accent"));
    }

    #[test]
    fn test_parse_negative_sample_position() {
        let args = parse(&["sample", "-0.5"]);
        assert!(matches!(args.command, Command::Sample { position } if position == -0.5));
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        let result = Args::try_parse_from(["ddk-theme", "show", "--format", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_theme_flag_overrides_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(temp_dir.path(), "ocean");
        let config_arg = config_path.to_str().unwrap();

        let from_file = resolve_config(&parse(&["--config", config_arg, "keys"])).unwrap();
        assert_eq!(from_file.theme, "ocean");
        assert_eq!(from_file.themes_dir, Some(temp_dir.path().join("themes")));

        let overridden = resolve_config(&parse(&[
            "--config",
            config_arg,
            "--theme",
            "land-cover",
            "--themes-dir",
            "/tmp/other",
            "keys",
        ]))
        .unwrap();
        assert_eq!(overridden.theme, "land-cover");
        assert_eq!(overridden.themes_dir, Some(PathBuf::from("/tmp/other")));
    }

    #[test]
    fn test_resolve_config_rejects_empty_theme_flag() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_config(temp_dir.path(), "land-cover");
        let args = parse(&["--config", config_path.to_str().unwrap(), "--theme", " ", "keys"]);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_get_prints_raw_strings_and_json() {
        let config = Config::default();
        let accent = run_to_string(Command::Get { key: "accent".into() }, &config).unwrap();
        assert_eq!(accent, "#2186f4\n");

        let width = run_to_string(
            Command::Get {
                key: "border_style.borderWidth".into(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(width, "0px 0px 1px 0px\n");

        let radius = run_to_string(
            Command::Get {
                key: "border_style.borderRadius".into(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(radius, "0\n");
    }

    #[test]
    fn test_get_missing_key_fails() {
        let err = run_to_string(Command::Get { key: "sparkle".into() }, &Config::default())
            .unwrap_err();
        assert!(err.to_string().contains("sparkle"));
    }

    #[test]
    fn test_sample_prints_colorscale_stop() {
        let config = Config::default();
        let first = run_to_string(Command::Sample { position: 0.0 }, &config).unwrap();
        assert_eq!(first, "#1f78b4\n");
        let last = run_to_string(Command::Sample { position: 1.0 }, &config).unwrap();
        assert_eq!(last, "#ffffff\n");
    }

    #[test]
    fn test_series_wraps_around_colorway() {
        let out = run_to_string(Command::Series { count: 9 }, &Config::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "0\t#119dff");
        assert_eq!(lines[8], "8\t#119dff");
    }

    #[test]
    fn test_validate_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let good = temp_dir.path().join("good.json");
        let bad = temp_dir.path().join("bad.json");

        let mut value = Theme::builtin().to_json_value().unwrap();
        std::fs::write(&good, value.to_string()).unwrap();
        value["font_size"] = "-19px".into();
        std::fs::write(&bad, value.to_string()).unwrap();

        let out = run_to_string(Command::Validate { file: Some(good.clone()) }, &Config::default())
            .unwrap();
        assert_eq!(out, format!("{}: ok\n", good.display()));

        let err = run_to_string(Command::Validate { file: Some(bad) }, &Config::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("font_size"));
    }

    #[test]
    fn test_list_marks_normalized_selection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config {
            theme: "Land_Cover".to_string(),
            themes_dir: Some(temp_dir.path().to_path_buf()),
            export: ExportConfig::default(),
        };
        let out = run_to_string(Command::List, &config).unwrap();
        assert!(out.lines().any(|line| line == "* land-cover"), "{out}");
    }

    #[test]
    fn test_unknown_theme_fails() {
        let config = Config {
            theme: "no-such-theme".to_string(),
            themes_dir: None,
            export: ExportConfig::default(),
        };
        assert!(run_to_string(Command::Keys, &config).is_err());
    }

    #[test]
    fn test_export_writes_asset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("assets").join("theme.json");
        let out = run_to_string(
            Command::Export {
                out: path.clone(),
                format: Some(ExportFormat::Json),
            },
            &Config::default(),
        )
        .unwrap();

        assert_eq!(out.trim_end(), path.display().to_string());
        assert_eq!(Theme::from_file(&path).unwrap(), *Theme::builtin());
    }
}
