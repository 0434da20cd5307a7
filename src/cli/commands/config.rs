//! Config command implementation.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::RudoroError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read, parsed or written.
pub fn config(
    path: Option<&Path>,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, RudoroError> {
    let path = resolve_path(path)?;

    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(&path)?;
            match format {
                OutputFormat::Json => to_json(&config),
                OutputFormat::Pretty => config.to_yaml(),
            }
        }
        ConfigCommands::Path => Ok(path.display().to_string()),
        ConfigCommands::Init { force } => init(&path, force, format),
    }
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf, RudoroError> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Paths::new()?.config_file),
    }
}

fn init(path: &Path, force: bool, format: OutputFormat) -> Result<String, RudoroError> {
    if path.exists() && !force {
        return Err(RudoroError::Config(format!(
            "Config file already exists at {}. Use --force to overwrite it.",
            path.display()
        )));
    }

    let config = Config::default();
    config.save_to_path(path)?;
    log::info!("Wrote default config to {}", path.display());

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "path": path,
            "config": config,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Wrote default config to".green(),
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_show() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let out = config(Some(&path), ConfigCommands::Init { force: false }, OutputFormat::Pretty)
            .unwrap();
        assert!(out.starts_with("Wrote default config to"));
        assert!(path.exists());

        let yaml = config(Some(&path), ConfigCommands::Show, OutputFormat::Pretty).unwrap();
        assert!(yaml.contains("work_minutes: 60"));

        let json = config(Some(&path), ConfigCommands::Show, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["timer"]["cycles_before_long_break"], 4);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "timer:\n  work_minutes: 30\n").unwrap();

        let err = config(Some(&path), ConfigCommands::Init { force: false }, OutputFormat::Pretty)
            .unwrap_err();
        assert!(matches!(err, RudoroError::Config(_)));

        config(Some(&path), ConfigCommands::Init { force: true }, OutputFormat::Pretty).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.timer.work_minutes, 60);
    }

    #[test]
    fn test_path_uses_override() {
        let path = Path::new("/tmp/rudoro-test.yaml");
        let out = config(Some(path), ConfigCommands::Path, OutputFormat::Pretty).unwrap();
        assert_eq!(out, "/tmp/rudoro-test.yaml");
    }
}
